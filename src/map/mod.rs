mod build;
mod layer;
mod map;
mod style;

pub use build::{BASEMAP_LAYER_NAME, MASK_LAYER_NAME};
pub use layer::{GeoJsonLayer, LayerKind, TileLayer, Tooltip};
pub use map::InteractiveMap;
pub use style::Style;

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, GeoJson};
    use shapefile::{dbase::{FieldValue, Record}, Point, Polygon, PolygonRing, Shape};

    use crate::{
        choropleth::TractLayer,
        config::MapConfig,
        district::DistrictLayer,
        palette::{Colormap, Palette},
    };

    fn square(x: f64) -> Shape {
        Shape::Polygon(Polygon::new(PolygonRing::Outer(vec![
            Point::new(x, 0.0), Point::new(x, 1.0), Point::new(x + 1.0, 1.0), Point::new(x + 1.0, 0.0), Point::new(x, 0.0),
        ])))
    }

    fn districts(config: &MapConfig, palette: &Palette) -> Vec<DistrictLayer> {
        config.sources.iter()
            .map(|source| {
                let records = [63, 27, 1].into_iter()
                    .map(|id| {
                        let mut record = Record::default();
                        record.insert(source.district_column.clone(), FieldValue::Numeric(Some(id as f64)));
                        record
                    })
                    .collect();
                let shapes = (0..3).map(|i| square(i as f64)).collect();
                DistrictLayer::from_shapes(source, shapes, records, palette).unwrap()
            })
            .collect()
    }

    fn tracts() -> TractLayer {
        let feature: Feature = GeoJson::from_json_value(serde_json::json!({
            "type": "Feature",
            "properties": {"Pop_Dens": 10.0, "VAP_Dens": 8.0, "BVAP_Dens": 4.0, "Perc_BVAP": 0.5},
            "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}
        })).unwrap().try_into().unwrap();
        TractLayer::from_features(&[feature]).unwrap()
    }

    fn assembled() -> InteractiveMap {
        let config = MapConfig::default();
        let palette = Palette::build(&Colormap::gist_rainbow(), &config.affected, &config.adjacent, config.seed, &config.overrides).unwrap();
        InteractiveMap::assemble(&config, &districts(&config, &palette), &tracts()).unwrap()
    }

    #[test]
    fn layer_control_lists_overlays_then_base_layers() {
        let map = assembled();
        let names = map.control_entries().into_iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, [
            "PGP Reform Fill", "Enacted Fill", "VA House Dems Fill",
            "PGP Reform Outline", "Enacted Outline", "VA House Dems Outline",
            "OpenStreetMap", "POP / sq. mi", "VAP / sq. mi", "BVAP / sq. mi", "Prop BVAP",
        ]);
        assert_eq!(map.registered_layers(), 13);
        assert_eq!(map.layers().iter().filter(|layer| layer.in_control()).count() + map.tiles().len(), 12);
    }

    #[test]
    fn only_the_basemap_proxy_and_mask_start_visible() {
        let map = assembled();
        let shown = map.layers().iter().filter(|layer| layer.show).map(|layer| layer.name.as_str()).collect::<Vec<_>>();
        assert_eq!(shown, [BASEMAP_LAYER_NAME, MASK_LAYER_NAME]);
    }

    #[test]
    fn mask_comes_after_the_base_layers() {
        let map = assembled();
        let last = map.layers().last().unwrap();
        assert_eq!(last.name, MASK_LAYER_NAME);
        assert_eq!(last.kind, LayerKind::Fixed);
        assert_eq!(map.tiles(), [TileLayer::openstreetmap()]);
    }

    #[test]
    fn page_furniture_is_attached() {
        let map = assembled();
        assert_eq!(map.html().len(), 3);
        assert_eq!(map.scripts().len(), 1);
        assert!(map.header()[0].contains("user-scalable=no"));
    }
}
