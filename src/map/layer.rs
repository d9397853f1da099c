use anyhow::Result;
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

use crate::common;
use super::Style;

/// Where a layer sits in the layer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Checkbox; any number can be visible.
    Overlay,
    /// Radio button; exactly one is visible.
    Base,
    /// Always drawn, never listed in the control.
    Fixed,
}

/// Hover text attached to every feature of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Tooltip {
    None,
    /// One table row per property, labelled by the matching alias.
    Fields { fields: Vec<String>, aliases: Vec<String> },
    Text(String),
}

impl Tooltip {
    pub fn fields<S: Into<String>>(fields: impl IntoIterator<Item = S>, aliases: impl IntoIterator<Item = S>) -> Self {
        Tooltip::Fields {
            fields: fields.into_iter().map(Into::into).collect(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named GeoJSON layer whose features carry their own style.
#[derive(Debug, Clone)]
pub struct GeoJsonLayer {
    pub name: String,
    pub kind: LayerKind,
    pub show: bool,
    pub tooltip: Tooltip,
    pub features: Vec<Value>,
}

impl GeoJsonLayer {
    pub fn new(name: impl Into<String>, kind: LayerKind, show: bool, tooltip: Tooltip) -> Self {
        Self { name: name.into(), kind, show, tooltip, features: Vec::new() }
    }

    /// Append one feature; `style` and `highlight` are stored in its properties.
    pub fn push_feature(&mut self, geometry: &MultiPolygon<f64>, mut properties: Map<String, Value>, style: &Style, highlight: Option<&Style>) -> Result<()> {
        properties.insert("style".into(), serde_json::to_value(style)?);
        if let Some(highlight) = highlight {
            properties.insert("highlight".into(), serde_json::to_value(highlight)?);
        }

        self.features.push(json!({
            "type": "Feature",
            "geometry": common::multipolygon_to_geojson(geometry),
            "properties": properties,
        }));
        Ok(())
    }

    #[inline] pub fn in_control(&self) -> bool { self.kind != LayerKind::Fixed }

    pub fn to_feature_collection(&self) -> Value {
        json!({ "type": "FeatureCollection", "features": self.features })
    }
}

/// A raster tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub in_control: bool,
}

impl TileLayer {
    /// OpenStreetMap tiles, zoomed in to county level or closer.
    pub fn openstreetmap() -> Self {
        Self {
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
            min_zoom: 8,
            max_zoom: 18,
            in_control: false,
        }
    }
}
