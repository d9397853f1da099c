use anyhow::Result;
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

use crate::{
    choropleth::{Metric, MetricScale, TractLayer, RAMP},
    district::{DistrictLayer, DISTRICT_COLUMN},
};
use super::{GeoJsonLayer, LayerKind, Style, Tooltip};

/// Base layer name of the transparent tract layer that leaves the tiles visible.
pub const BASEMAP_LAYER_NAME: &str = "OpenStreetMap";

/// Name of the fixed mask layer over the districts outside the study area.
pub const MASK_LAYER_NAME: &str = "nonBH districts";

fn district_tooltip(layer: &DistrictLayer) -> Tooltip {
    Tooltip::fields(
        ["Empty", "status", DISTRICT_COLUMN],
        [layer.source().name.as_str(), "Status", "District"],
    )
}

fn district_properties(district: &str, status: &str, color: Option<&str>) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert("Empty".into(), json!(""));
    properties.insert("status".into(), json!(status));
    properties.insert(DISTRICT_COLUMN.into(), json!(district));
    properties.insert("color".into(), json!(color));
    properties
}

/// Rounded metric values; whole-number metrics print without a decimal point.
fn tract_properties(values: &[(Metric, f64)]) -> Map<String, Value> {
    values.iter()
        .map(|&(metric, value)| {
            let value = if metric.decimals() == 0 && value.is_finite() { json!(value as i64) } else { json!(value) };
            (metric.field().to_string(), value)
        })
        .collect()
}

impl GeoJsonLayer {
    /// "<name> Fill" overlay: districts tinted with their palette color.
    pub fn district_fill(layer: &DistrictLayer) -> Result<Self> {
        let name = format!("{} Fill", layer.source().name);
        let mut out = Self::new(name, LayerKind::Overlay, layer.source().show, district_tooltip(layer));
        let highlight = Style::district_fill_highlight();

        for record in layer.records()? {
            let status = record.status.map(|s| s.label()).unwrap_or_default();
            out.push_feature(
                record.geometry,
                district_properties(record.district, status, record.color),
                &Style::district_fill(record.color, record.status),
                Some(&highlight),
            )?;
        }
        Ok(out)
    }

    /// "<name> Outline" overlay: district boundaries only.
    pub fn district_outline(layer: &DistrictLayer) -> Result<Self> {
        let name = format!("{} Outline", layer.source().name);
        let mut out = Self::new(name, LayerKind::Overlay, layer.source().show, district_tooltip(layer));
        let highlight = Style::district_outline_highlight();

        for record in layer.records()? {
            let status = record.status.map(|s| s.label()).unwrap_or_default();
            out.push_feature(
                record.geometry,
                district_properties(record.district, status, record.color),
                &Style::district_outline(record.color),
                Some(&highlight),
            )?;
        }
        Ok(out)
    }

    /// Transparent tracts, selected by default so the bare tiles show through.
    pub fn basemap_proxy(tracts: &TractLayer) -> Result<Self> {
        let mut out = Self::new(BASEMAP_LAYER_NAME, LayerKind::Base, true, Tooltip::None);
        let style = Style::basemap_proxy();
        for geometry in tracts.geoms() {
            out.push_feature(geometry, Map::new(), &style, None)?;
        }
        Ok(out)
    }

    /// One choropleth base layer, each tract colored by its bucket.
    pub fn choropleth(tracts: &TractLayer, metric: Metric, scale: &MetricScale) -> Result<Self> {
        let tooltip = Tooltip::fields([metric.field()], [metric.label()]);
        let mut out = Self::new(metric.layer_name(), LayerKind::Base, false, tooltip);

        let columns = Metric::ALL.iter()
            .map(|&m| Ok((m, tracts.values(m)?)))
            .collect::<Result<Vec<_>>>()?;
        let buckets = tracts.classify(metric, scale)?;

        for (i, (geometry, bucket)) in tracts.geoms().iter().zip(buckets).enumerate() {
            let values = columns.iter().map(|(m, v)| (*m, v[i])).collect::<Vec<_>>();
            out.push_feature(
                geometry,
                tract_properties(&values),
                &Style::choropleth(RAMP[bucket]),
                None,
            )?;
        }
        Ok(out)
    }

    /// Single dark feature covering every district outside the study area.
    pub fn mask(geometry: &MultiPolygon<f64>) -> Result<Self> {
        let mut out = Self::new(MASK_LAYER_NAME, LayerKind::Fixed, true, Tooltip::Text("Non-affected districts".into()));
        out.push_feature(geometry, Map::new(), &Style::mask(), None)?;
        Ok(out)
    }
}
