use std::{fs, path::Path};

use districtmap::{
    build_map,
    cli::{BuildArgs, Cli, Commands},
    commands::build,
    MapConfig, MapSource,
};
use serde_json::json;
use shapefile::{
    dbase::{FieldName, FieldValue, Record, TableWriterBuilder},
    Point, Polygon, PolygonRing,
};

/// Unit square with its lower left corner at (x, y), in lon/lat.
fn square(x: f64, y: f64) -> Polygon {
    Polygon::new(PolygonRing::Outer(vec![
        Point::new(x, y),
        Point::new(x, y + 0.1),
        Point::new(x + 0.1, y + 0.1),
        Point::new(x + 0.1, y),
        Point::new(x, y),
    ]))
}

/// Writes one district plan: ids 63 and 27 are in the study area, 1 and 2 are not.
fn write_plan(path: &Path, column: &str, character: bool) {
    let name = FieldName::try_from(column).unwrap();
    let table = if character {
        TableWriterBuilder::new().add_character_field(name, 8)
    } else {
        TableWriterBuilder::new().add_numeric_field(name, 8, 0)
    };

    let mut writer = shapefile::Writer::from_path(path, table).unwrap();
    for (i, id) in [63, 1, 27, 2].into_iter().enumerate() {
        let mut record = Record::default();
        let value = if character {
            FieldValue::Character(Some(id.to_string()))
        } else {
            FieldValue::Numeric(Some(id as f64))
        };
        record.insert(column.to_string(), value);
        writer.write_shape_and_record(&square(-77.0 + i as f64 * 0.1, 37.0), &record).unwrap();
    }
}

fn write_tracts(path: &Path) {
    let tract = |x: f64, pop: f64, prop: f64| json!({
        "type": "Feature",
        "properties": {"Pop_Dens": pop, "VAP_Dens": pop * 0.8, "BVAP_Dens": pop * prop, "Perc_BVAP": prop},
        "geometry": {"type": "Polygon", "coordinates": [[[x, 37.0], [x + 0.1, 37.0], [x + 0.1, 37.1], [x, 37.1], [x, 37.0]]]}
    });
    let collection = json!({
        "type": "FeatureCollection",
        "features": [tract(-77.0, 500.0, 0.25), tract(-76.9, 4000.0, 0.61), tract(-76.8, 60000.0, 0.95)],
    });
    fs::write(path, serde_json::to_string(&collection).unwrap()).unwrap();
}

/// Writes every input under `root` and returns a config pointing at them.
fn fixture(root: &Path) -> MapConfig {
    fs::create_dir_all(root.join("plans")).unwrap();
    write_plan(&root.join("plans/reform.shp"), "DISTRICT", true);
    write_plan(&root.join("plans/enacted.shp"), "ID", false);
    write_plan(&root.join("plans/dems.shp"), "OBJECTID", false);
    write_tracts(&root.join("tracts.json"));

    let source = |key: &str, name: &str, column: &str, mask: bool| MapSource {
        key: key.into(),
        name: name.into(),
        path: format!("plans/{key}.shp").into(),
        district_column: column.into(),
        show: false,
        mask,
    };

    MapConfig {
        sources: vec![
            source("reform", "PGP Reform", "DISTRICT", false),
            source("enacted", "Enacted", "ID", true),
            source("dems", "VA House Dems", "OBJECTID", false),
        ],
        tracts: "tracts.json".into(),
        output: "out/map.html".into(),
        ..MapConfig::default()
    }
}

#[test]
fn builds_the_full_layer_stack() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path()).resolve_paths(dir.path());

    let map = build_map(&config).unwrap();
    assert_eq!(map.control_entries().len(), 11);
    assert_eq!(map.control_entries().len() + map.tiles().len(), 12);

    // only 63 and 27 survive the palette filter
    for layer in &map.layers()[..6] {
        assert_eq!(layer.features.len(), 2, "{}", layer.name);
        assert_eq!(layer.features[0]["properties"]["district_no"], "63");
        assert_eq!(layer.features[1]["properties"]["district_no"], "27");
    }

    let mask = map.layers().last().unwrap();
    assert_eq!(mask.name, "nonBH districts");
    assert_eq!(mask.features.len(), 1);
}

#[test]
fn build_command_writes_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

    let args = BuildArgs { root: dir.path().to_path_buf(), config: Some(config_path), output: None, force: false };
    let cli = Cli { verbose: 0, command: Commands::Build(BuildArgs { root: args.root.clone(), config: None, output: None, force: false }) };
    build::run(&cli, &args).unwrap();

    let html = fs::read_to_string(dir.path().join("out/map.html")).unwrap();
    assert!(html.contains("L.control.layers(layer_control.base_layers, layer_control.overlays, { collapsed: false })"));
    assert!(html.contains(r#""PGP Reform Fill": geo_json_1,"#));
    assert!(html.contains(r#""VA House Dems Outline": geo_json_6,"#));
    assert!(html.contains(r#""Prop BVAP": geo_json_11,"#));
    assert!(html.contains("geo_json_7.addTo(map_0);"));
    assert!(!html.contains("geo_json_8.addTo(map_0);"));
    assert!(html.contains("geo_json_12.addTo(map_0);"));
    assert!(html.contains("minZoom: 8"));

    assert_eq!(html.matches(r#"<ul class="legend">"#).count(), 5);
    assert!(html.contains(r#"onchange="showNone()" checked="checked">OpenStreetMap"#));
    let none = html.find(r#"id="Legend None""#).unwrap();
    assert!(html[none..].starts_with(r#"id="Legend None" style="position: fixed"#));
    assert!(html[none..html[none..].find('>').unwrap() + none].contains("z-index: 9999"));

    assert!(html.contains("user-scalable=no"));
    assert!(html.contains("map_0.fitBounds([[36.482,-78.91],[38.22,-75.19]]);"));
    assert!(html.contains("Princeton Gerrymandering Project"));

    // a second run needs --force
    assert!(build::run(&cli, &args).is_err());
    let args = BuildArgs { force: true, ..args };
    build::run(&cli, &args).unwrap();
}

#[test]
fn stdout_output_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let args = BuildArgs { root: dir.path().to_path_buf(), config: None, output: Some("-".into()), force: true };
    let cli = Cli { verbose: 0, command: Commands::Build(BuildArgs { root: args.root.clone(), config: None, output: None, force: true }) };
    assert!(build::run(&cli, &args).is_err());
}

#[test]
fn missing_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();
    let config = MapConfig::default().resolve_paths(dir.path());
    assert!(build_map(&config).is_err());
}
