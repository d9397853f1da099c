use std::path::Path;

use anyhow::{bail, Context, Result};
use shapefile::{self as shp, dbase::{FieldValue, Record}, Reader, Shape};

use crate::common::require_file_exists;

/// Reads all shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_from_shapefile(path: &Path) -> Result<(Vec<Shape>, Vec<Record>)> {
    require_file_exists(path)?;
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut shapes = Vec::with_capacity(reader.shape_count()?);
    let mut records = Vec::with_capacity(shapes.capacity());
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result
            .with_context(|| format!("Error reading shape+record in {}", path.display()))?;
        shapes.push(shape);
        records.push(record);
    }
    Ok((shapes, records))
}

/// Convert a polygon shape into a geo::MultiPolygon, rejecting anything else.
pub(crate) fn shape_to_multipolygon(shape: Shape) -> Result<geo::MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(polygon) => Ok(shp_to_geo(&polygon)),
        other => bail!("found non-Polygon shape in layer: {:?}", other.shapetype()),
    }
}

/// Read a dBase field as text, the way a dataframe `astype(str)` would print it.
/// Integral numbers lose their decimal part ("63", not "63.0").
pub(crate) fn get_field_as_string(record: &Record, field: &str) -> Result<String> {
    fn number(n: f64) -> String {
        if n.fract() == 0.0 && n.abs() < 1e15 { format!("{}", n as i64) } else { n.to_string() }
    }

    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(FieldValue::Numeric(Some(n))) => Ok(number(*n)),
        Some(FieldValue::Float(Some(n))) => Ok(number(*n as f64)),
        Some(FieldValue::Double(n)) => Ok(number(*n)),
        Some(FieldValue::Integer(n)) => Ok(n.to_string()),
        Some(other) => bail!("unsupported value {:?} in id field: {}", other, field),
        None => bail!("missing id field: {}", field),
    }
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>
pub(crate) fn shp_to_geo(p: &shp::Polygon) -> geo::MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<geo::Coord<f64>>) {
        if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
            coords.push(coords[0])
        }
    }

    /// Get the signed area of a geo::Coord list (negative for clockwise)
    fn signed_area(pts: &[geo::Coord<f64>]) -> f64 {
        pts.windows(2).map(|w| w[0].x * w[1].y - w[1].x * w[0].y).sum::<f64>() / 2.0
    }

    // Shapefile rings are stored as [outer, hole, hole, ..., next outer, ...].
    // Outer rings are clockwise, so orientation tells them apart.
    let mut polys: Vec<geo::Polygon<f64>> = Vec::new();
    let mut current_exterior: Option<geo::LineString<f64>> = None;
    let mut current_holes: Vec<geo::LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut coords: Vec<geo::Coord<f64>> = ring.points().iter()
            .map(|pt| geo::Coord { x: pt.x, y: pt.y })
            .collect();
        ensure_closed(&mut coords);
        let is_exterior = signed_area(&coords) < 0.0;
        let ls = geo::LineString(coords);

        if is_exterior {
            if let Some(ext) = current_exterior.take() {
                polys.push(geo::Polygon::new(ext, std::mem::take(&mut current_holes)));
            }
            current_exterior = Some(ls);
        } else {
            current_holes.push(ls);
        }
    }
    if let Some(ext) = current_exterior {
        polys.push(geo::Polygon::new(ext, current_holes));
    }

    geo::MultiPolygon(polys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapefile::{Point, PolygonRing};

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Point> {
        // clockwise, as the shapefile format stores outer rings
        vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + size),
            Point::new(x0 + size, y0 + size),
            Point::new(x0 + size, y0),
            Point::new(x0, y0),
        ]
    }

    #[test]
    fn rings_group_into_polygons_with_holes() {
        let mut hole = square(1.0, 1.0, 1.0);
        hole.reverse();
        let polygon = shp::Polygon::with_rings(vec![
            PolygonRing::Outer(square(0.0, 0.0, 4.0)),
            PolygonRing::Inner(hole),
            PolygonRing::Outer(square(10.0, 10.0, 1.0)),
        ]);

        let mp = shp_to_geo(&polygon);
        assert_eq!(mp.0.len(), 2);
        assert_eq!(mp.0[0].interiors().len(), 1);
        assert!(mp.0[1].interiors().is_empty());
    }

    #[test]
    fn id_fields_print_like_strings() {
        let mut record = Record::default();
        record.insert("DISTRICT".to_string(), FieldValue::Character(Some(" 63 ".to_string())));
        record.insert("ID".to_string(), FieldValue::Numeric(Some(95.0)));
        record.insert("OBJECTID".to_string(), FieldValue::Integer(27));

        assert_eq!(get_field_as_string(&record, "DISTRICT").unwrap(), "63");
        assert_eq!(get_field_as_string(&record, "ID").unwrap(), "95");
        assert_eq!(get_field_as_string(&record, "OBJECTID").unwrap(), "27");
        assert!(get_field_as_string(&record, "MISSING").is_err());
    }

    #[test]
    fn non_polygon_shapes_are_rejected() {
        assert!(shape_to_multipolygon(Shape::Point(Point::new(0.0, 0.0))).is_err());
    }
}
