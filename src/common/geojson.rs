use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use geo::{LineString, MultiPolygon};
use geojson::{Feature, GeoJson};
use serde_json::{json, Value};

use crate::common::require_file_exists;

/// Read every feature of a GeoJSON FeatureCollection file.
pub(crate) fn read_from_geojson(path: &Path) -> Result<Vec<Feature>> {
    require_file_exists(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
    let geojson = text.parse::<GeoJson>()
        .with_context(|| format!("Failed to parse GeoJSON file: {}", path.display()))?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        _ => bail!("expected a FeatureCollection in {}", path.display()),
    }
}

/// Convert a feature's geometry to a geo::MultiPolygon (Polygon is promoted).
pub(crate) fn feature_to_multipolygon(feature: &Feature) -> Result<MultiPolygon<f64>> {
    let geometry = feature.geometry.as_ref()
        .context("feature has no geometry")?;

    match geo::Geometry::<f64>::try_from(&geometry.value)? {
        geo::Geometry::Polygon(polygon) => Ok(MultiPolygon(vec![polygon])),
        geo::Geometry::MultiPolygon(mp) => Ok(mp),
        other => bail!("found non-Polygon geometry in layer: {:?}", geometry_name(&other)),
    }
}

fn geometry_name(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::Line(_) => "Line",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::Polygon(_) => "Polygon",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::MultiPolygon(_) => "MultiPolygon",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        geo::Geometry::Rect(_) => "Rect",
        geo::Geometry::Triangle(_) => "Triangle",
    }
}

/// Read a numeric property of a feature.
pub(crate) fn get_numeric_property(feature: &Feature, name: &str) -> Result<f64> {
    match feature.property(name) {
        Some(Value::Number(n)) => n.as_f64()
            .with_context(|| format!("property {name} is not representable as f64")),
        Some(other) => bail!("property {name} is not numeric: {other}"),
        None => bail!("missing numeric property: {name}"),
    }
}

/// Convert a MultiPolygon to a serde_json::Value holding a GeoJSON geometry.
pub(crate) fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    fn ring(ls: &LineString<f64>) -> Vec<[f64; 2]> {
        ls.coords().map(|c| [c.x, c.y]).collect()
    }

    let polygons = mp.0.iter()
        .map(|polygon| std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(ring)
            .collect::<Vec<_>>())
        .collect::<Vec<_>>();

    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn multipolygon_coordinates_nest_rings_per_polygon() {
        let mp = MultiPolygon(vec![polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)]],
        ]]);

        let value = multipolygon_to_geojson(&mp);
        assert_eq!(value["type"], "MultiPolygon");
        // polygons -> rings -> positions -> [x, y]
        assert_eq!(value["coordinates"].as_array().unwrap().len(), 1);
        assert_eq!(value["coordinates"][0].as_array().unwrap().len(), 2);
        assert_eq!(value["coordinates"][0][1][1], json!([2.0, 1.0]));
    }

    #[test]
    fn polygon_features_are_promoted() {
        let feature: Feature = r#"{
            "type": "Feature",
            "properties": {"Pop_Dens": 12.5, "name": "x"},
            "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}
        }"#.parse::<GeoJson>().unwrap().try_into().unwrap();

        assert_eq!(feature_to_multipolygon(&feature).unwrap().0.len(), 1);
        assert_eq!(get_numeric_property(&feature, "Pop_Dens").unwrap(), 12.5);
        assert!(get_numeric_property(&feature, "name").is_err());
        assert!(get_numeric_property(&feature, "VAP_Dens").is_err());
    }
}
