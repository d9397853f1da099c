use serde::Serialize;

use crate::{choropleth::RAMP, palette::DistrictStatus};

const DISTRICT_EDGE: &str = "#888";
const OUTLINE_EDGE: &str = "#42f4ee";
const BLANK_FILL: &str = "#fff";

/// Leaflet path options, serialized as-is into each feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Style {
    /// Filled district; adjacent districts are fainter with thinner edges.
    pub fn district_fill(color: Option<&str>, status: Option<DistrictStatus>) -> Self {
        let adjacent = status == Some(DistrictStatus::Adjacent);
        Self {
            fill_color: Some(color.unwrap_or(BLANK_FILL).into()),
            fill_opacity: Some(if adjacent { 0.2 } else { 0.58 }),
            weight: Some(if adjacent { 1.5 } else { 3.2 }),
            color: Some(DISTRICT_EDGE.into()),
            opacity: None,
        }
    }

    pub fn district_fill_highlight() -> Self {
        Self {
            fill_opacity: Some(0.7),
            weight: Some(1.5),
            color: Some(DISTRICT_EDGE.into()),
            ..Default::default()
        }
    }

    /// Unfilled district boundary.
    pub fn district_outline(color: Option<&str>) -> Self {
        Self {
            fill_color: Some(color.unwrap_or(BLANK_FILL).into()),
            fill_opacity: Some(0.0),
            weight: Some(3.0),
            color: Some(OUTLINE_EDGE.into()),
            opacity: None,
        }
    }

    pub fn district_outline_highlight() -> Self {
        Self {
            fill_color: Some("#adadad".into()),
            fill_opacity: Some(0.4),
            weight: Some(5.0),
            color: Some(OUTLINE_EDGE.into()),
            opacity: None,
        }
    }

    /// Opaque tract fill, edge drawn in the same color.
    pub fn choropleth(color: &str) -> Self {
        Self {
            fill_color: Some(color.into()),
            fill_opacity: Some(1.0),
            weight: Some(1.0),
            color: Some(color.into()),
            opacity: None,
        }
    }

    /// Invisible tracts standing in for the bare basemap.
    pub fn basemap_proxy() -> Self {
        Self {
            fill_color: Some(RAMP[0].into()),
            fill_opacity: Some(0.0),
            weight: Some(1.0),
            color: Some(RAMP[0].into()),
            opacity: Some(0.0),
        }
    }

    /// Dark veil over the districts outside the study area.
    pub fn mask() -> Self {
        Self {
            fill_color: Some("#000".into()),
            fill_opacity: Some(0.5),
            weight: Some(0.0),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_districts_are_fainter() {
        let affected = Style::district_fill(Some("#123456"), Some(DistrictStatus::Affected));
        let adjacent = Style::district_fill(Some("#123456"), Some(DistrictStatus::Adjacent));
        assert_eq!((affected.fill_opacity, affected.weight), (Some(0.58), Some(3.2)));
        assert_eq!((adjacent.fill_opacity, adjacent.weight), (Some(0.2), Some(1.5)));
    }

    #[test]
    fn missing_color_falls_back_to_white() {
        assert_eq!(Style::district_fill(None, None).fill_color.as_deref(), Some("#fff"));
        assert_eq!(Style::district_outline(None).fill_color.as_deref(), Some("#fff"));
    }

    #[test]
    fn serializes_leaflet_option_names() {
        let json = serde_json::to_value(Style::mask()).unwrap();
        assert_eq!(json, serde_json::json!({"fillColor": "#000", "fillOpacity": 0.5, "weight": 0.0}));
    }
}
