use anyhow::{ensure, Context, Result};
use tracing::{debug, info};

use crate::{
    choropleth::TractLayer,
    cli::{BuildArgs, Cli},
    common,
    config::MapConfig,
    district::DistrictLayer,
    map::InteractiveMap,
    palette::{Colormap, Palette},
};

pub fn run(_cli: &Cli, args: &BuildArgs) -> Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(output) = &args.output {
        common::assert_not_stdout(output)?;
        config.output = output.clone();
    }
    let config = config.resolve_paths(&args.root);

    let map = build_map(&config)?;
    map.save(&config.output, args.force)?;

    info!("[build] wrote {}", config.output.display());
    Ok(())
}

/// Palette, district layers, tracts, then the assembled page.
pub fn build_map(config: &MapConfig) -> Result<InteractiveMap> {
    ensure!(config.sources.iter().filter(|source| source.mask).count() <= 1,
        "[build] at most one source may provide the mask");

    let palette = Palette::build(&Colormap::gist_rainbow(), &config.affected, &config.adjacent, config.seed, &config.overrides)
        .context("[build] Failed to build palette")?;
    info!("[build] palette: {} districts, seed {}", palette.len(), config.seed);

    let districts = config.sources.iter()
        .map(|source| {
            common::require_file_exists(&source.path)?;
            let layer = DistrictLayer::from_shapefile(source, &palette)?;
            info!("[build] {}: {} districts from {}", source.key, layer.len(), source.path.display());
            Ok(layer)
        })
        .collect::<Result<Vec<_>>>()?;

    common::require_file_exists(&config.tracts)?;
    let tracts = TractLayer::from_geojson(&config.tracts)?;
    info!("[build] {} tracts from {}", tracts.len(), config.tracts.display());

    let map = InteractiveMap::assemble(config, &districts, &tracts)?;
    debug!("[build] {} layers, {} in the layer control", map.registered_layers(), map.control_entries().len());
    Ok(map)
}
