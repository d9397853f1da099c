pub mod build;
pub mod palette;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::{common, config::MapConfig};

/// Built-in defaults, or the given JSON file layered over them.
pub(crate) fn load_config(path: Option<&Path>) -> Result<MapConfig> {
    match path {
        Some(path) => {
            common::require_file_exists(path)?;
            info!("[config] loading {}", path.display());
            MapConfig::from_json_file(path)
        }
        None => Ok(MapConfig::default()),
    }
}
