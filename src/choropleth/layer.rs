use std::path::Path;

use anyhow::{ensure, Context, Result};
use geo::MultiPolygon;
use geojson::Feature;
use polars::{frame::DataFrame, prelude::Column};
use tracing::debug;

use crate::common;
use super::{Metric, MetricScale};

/// Census tracts with their rounded density fields.
#[derive(Debug, Clone)]
pub struct TractLayer {
    data: DataFrame,
    geoms: Vec<MultiPolygon<f64>>,
}

impl TractLayer {
    /// Loads tract geometries and the four density fields from a GeoJSON file.
    pub fn from_geojson(path: &Path) -> Result<Self> {
        let features = common::read_from_geojson(path)?;
        Self::from_features(&features)
            .with_context(|| format!("Error reading tracts from {}", path.display()))
    }

    /// Build from parsed features, rounding each metric to its precision.
    pub fn from_features(features: &[Feature]) -> Result<Self> {
        let geoms = features.iter()
            .enumerate()
            .map(|(i, feature)| common::feature_to_multipolygon(feature)
                .with_context(|| format!("tract feature {i}")))
            .collect::<Result<Vec<_>>>()?;

        let columns = Metric::ALL.iter()
            .map(|metric| {
                let values = features.iter()
                    .enumerate()
                    .map(|(i, feature)| common::get_numeric_property(feature, metric.field())
                        .map(|v| metric.round(v))
                        .with_context(|| format!("tract feature {i}")))
                    .collect::<Result<Vec<f64>>>()?;
                Ok(Column::new(metric.field().into(), values))
            })
            .collect::<Result<Vec<_>>>()?;

        let data = DataFrame::new(columns)?;
        debug!("[tracts] loaded {} tracts", data.height());

        Ok(Self { data, geoms })
    }

    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    #[inline] pub fn geoms(&self) -> &[MultiPolygon<f64>] { &self.geoms }

    #[inline] pub fn data(&self) -> &DataFrame { &self.data }

    /// Rounded values of one metric, in feature order.
    pub fn values(&self, metric: Metric) -> Result<Vec<f64>> {
        let values = self.data.column(metric.field())?.f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        ensure!(values.len() == self.geoms.len(),
            "[tracts] {} has {} values for {} geometries", metric.field(), values.len(), self.geoms.len());
        Ok(values)
    }

    /// Bucket index of every tract for one metric.
    pub fn classify(&self, metric: Metric, scale: &MetricScale) -> Result<Vec<usize>> {
        Ok(self.values(metric)?.into_iter().map(|v| scale.classify(v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::GeoJson;

    fn feature(pop: f64, vap: f64, bvap: f64, prop: f64) -> Feature {
        let json = serde_json::json!({
            "type": "Feature",
            "properties": {"Pop_Dens": pop, "VAP_Dens": vap, "BVAP_Dens": bvap, "Perc_BVAP": prop},
            "geometry": {"type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}
        });
        GeoJson::from_json_value(json).unwrap().try_into().unwrap()
    }

    #[test]
    fn values_are_rounded_per_metric() {
        let layer = TractLayer::from_features(&[feature(499.6, 10.4, 2.5, 0.12345)]).unwrap();
        assert_eq!(layer.values(Metric::Pop).unwrap(), vec![500.0]);
        assert_eq!(layer.values(Metric::Vap).unwrap(), vec![10.0]);
        assert_eq!(layer.values(Metric::Bvap).unwrap(), vec![2.0]);
        assert_eq!(layer.values(Metric::PropBvap).unwrap(), vec![0.123]);
    }

    #[test]
    fn rounding_happens_before_classification() {
        // 500.4 rounds to 500, which sits on the shared edge of the first two buckets
        let layer = TractLayer::from_features(&[feature(500.4, 0.0, 0.0, 0.0), feature(500.6, 0.0, 0.0, 0.0)]).unwrap();
        assert_eq!(layer.classify(Metric::Pop, &Metric::Pop.default_scale()).unwrap(), vec![0, 1]);
    }

    #[test]
    fn missing_field_fails() {
        let mut f = feature(1.0, 1.0, 1.0, 0.1);
        f.properties.as_mut().unwrap().remove("BVAP_Dens");
        assert!(TractLayer::from_features(&[f]).is_err());
    }
}
