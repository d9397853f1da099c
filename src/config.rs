use std::{fs::File, io::BufReader, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{choropleth::{Metric, MetricScale}, palette::ColorOverride};

/// Geographic bounding box in degrees (WGS84 lon/lat).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Leaflet ordering: [[south, west], [north, east]].
    pub fn to_latlng_pairs(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}

/// One district plan to draw, e.g. the enacted map or a reform proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSource {
    /// Short key, e.g. "enacted".
    pub key: String,
    /// Display name used for layer names and tooltips.
    pub name: String,
    /// Path to the `.shp` file (relative paths resolve against the root).
    pub path: PathBuf,
    /// Name of the attribute holding the district number in this file.
    pub district_column: String,
    /// Whether the district overlays start visible.
    #[serde(default)]
    pub show: bool,
    /// Whether this source's non-BH districts make up the mask overlay.
    #[serde(default)]
    pub mask: bool,
}

/// Complete, immutable description of one map build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub seed: u64,
    pub affected: Vec<u32>,
    pub adjacent: Vec<u32>,
    pub overrides: Vec<ColorOverride>,
    pub bounds: Bounds,
    pub sources: Vec<MapSource>,
    pub tracts: PathBuf,
    pub output: PathBuf,
    pub pop_scale: MetricScale,
    pub vap_scale: MetricScale,
    pub bvap_scale: MetricScale,
    pub prop_scale: MetricScale,
}

impl Default for MapConfig {
    fn default() -> Self {
        fn source(key: &str, name: &str, path: &str, district_column: &str, mask: bool) -> MapSource {
            MapSource {
                key: key.into(),
                name: name.into(),
                path: path.into(),
                district_column: district_column.into(),
                show: false,
                mask,
            }
        }

        Self {
            seed: 105,
            affected: vec![63, 69, 70, 71, 74, 77, 80, 89, 90, 92, 95],
            adjacent: vec![
                27, 55, 61, 62, 64, 66, 68, 72, 73, 75, 76,
                78, 79, 81, 83, 85, 91, 93, 94, 96, 97, 100,
            ],
            overrides: vec![
                ColorOverride::Hex { district: 62, color: "#002235".into() },
                ColorOverride::CopyFrom { district: 83, from: 95 },
                ColorOverride::Hex { district: 81, color: "#330035".into() },
                ColorOverride::CopyFrom { district: 64, from: 61 },
                ColorOverride::CopyFrom { district: 97, from: 75 },
            ],
            bounds: Bounds { south: 36.482, west: -78.91, north: 38.22, east: -75.19 },
            sources: vec![
                source("reform", "PGP Reform", "Maps/Reform map/Districts map bethune-hill final.shp", "DISTRICT", false),
                source("enacted", "Enacted", "Maps/Enacted map/enacted.shp", "ID", true),
                source("dems", "VA House Dems", "Maps/House Dems map/HB7001.shp", "OBJECTID", false),
            ],
            tracts: "Maps/Relevant census tracts/BH_Tracts.json".into(),
            output: "Maps/Interactive/map_comparison_simple_legend.html".into(),
            pop_scale: Metric::Pop.default_scale(),
            vap_scale: Metric::Vap.default_scale(),
            bvap_scale: Metric::Bvap.default_scale(),
            prop_scale: Metric::PropBvap.default_scale(),
        }
    }
}

impl MapConfig {
    /// Load a configuration file; fields it leaves out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Affected ids followed by adjacent ids, as strings.
    pub fn district_ids(&self) -> Vec<String> {
        self.affected.iter().chain(&self.adjacent).map(u32::to_string).collect()
    }

    /// The threshold scale configured for a metric.
    pub fn scale(&self, metric: Metric) -> &MetricScale {
        match metric {
            Metric::Pop => &self.pop_scale,
            Metric::Vap => &self.vap_scale,
            Metric::Bvap => &self.bvap_scale,
            Metric::PropBvap => &self.prop_scale,
        }
    }

    /// Rewrite every relative input/output path to live under `root`.
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        fn resolve(root: &Path, path: &mut PathBuf) {
            if path.is_relative() { *path = root.join(&*path) }
        }

        for source in &mut self.sources {
            resolve(root, &mut source.path);
        }
        resolve(root, &mut self.tracts);
        resolve(root, &mut self.output);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_bethune_hill_districts() {
        let config = MapConfig::default();
        assert_eq!(config.affected.len(), 11);
        assert_eq!(config.adjacent.len(), 22);
        assert_eq!(config.district_ids().len(), 33);
        assert_eq!(config.district_ids()[0], "63");
        assert_eq!(config.sources.iter().filter(|source| source.mask).count(), 1);
        assert!(config.sources.iter().all(|source| !source.show));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: MapConfig = serde_json::from_str(r#"{ "seed": 7, "output": "out.html" }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.output, PathBuf::from("out.html"));
        assert_eq!(config.sources, MapConfig::default().sources);
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let config = MapConfig::default().resolve_paths(Path::new("/data"));
        assert_eq!(config.sources[1].path, PathBuf::from("/data/Maps/Enacted map/enacted.shp"));
        assert!(config.output.starts_with("/data"));

        let config = MapConfig { tracts: "/abs/tracts.json".into(), ..MapConfig::default() };
        assert_eq!(config.resolve_paths(Path::new("/data")).tracts, PathBuf::from("/abs/tracts.json"));
    }
}
