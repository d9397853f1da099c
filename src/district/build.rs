use anyhow::{ensure, Context, Result};
use geo::{BooleanOps, MultiPolygon};
use polars::{frame::DataFrame, prelude::*};
use shapefile::{dbase::Record, Shape};
use tracing::debug;

use crate::{common, config::MapSource, palette::Palette};
use super::{DistrictLayer, DISTRICT_COLUMN};

impl DistrictLayer {
    /// Loads one district plan from its shapefile and keeps the palette's districts.
    pub fn from_shapefile(source: &MapSource, palette: &Palette) -> Result<Self> {
        let (shapes, records) = common::read_from_shapefile(&source.path)?;
        Self::from_shapes(source, shapes, records, palette)
            .with_context(|| format!("Error building district layer from {}", source.path.display()))
    }

    /// Build the layer from shapes + records already read from disk.
    pub fn from_shapes(source: &MapSource, shapes: Vec<Shape>, records: Vec<Record>, palette: &Palette) -> Result<Self> {
        ensure!(shapes.len() == records.len(),
            "[district] {} shapes but {} records", shapes.len(), records.len());

        let ids = records.iter()
            .map(|record| common::get_field_as_string(record, &source.district_column))
            .collect::<Result<Vec<_>>>()?;

        let all_geoms = shapes.into_iter()
            .map(common::shape_to_multipolygon)
            .collect::<Result<Vec<_>>>()?;

        // Every district outside the palette merges into one mask geometry.
        let mask = source.mask.then(|| union_all(
            all_geoms.iter().zip(&ids)
                .filter(|(_, id)| !palette.contains(id))
                .map(|(geom, _)| geom)
        ));

        let mut df = DataFrame::new(vec![Column::new(source.district_column.as_str().into(), ids)])?
            .with_row_index("idx".into(), None)?;

        if source.district_column != DISTRICT_COLUMN {
            df.rename(&source.district_column, DISTRICT_COLUMN.into())?;
        }

        let keep = df.column(DISTRICT_COLUMN)?.str()?
            .into_iter()
            .map(|id| id.is_some_and(|id| palette.contains(id)))
            .collect::<Vec<bool>>();
        let df = df.filter(&BooleanChunked::new("keep".into(), keep.as_slice()))?;

        let mut df = df.left_join(&palette.to_dataframe()?, [DISTRICT_COLUMN], [DISTRICT_COLUMN])?
            .sort(["idx"], SortMultipleOptions::default())?;

        // Blank first tooltip row, labelled with the source name.
        let height = df.height();
        df.with_column(Column::new("Empty".into(), vec![""; height]))?;

        let geoms = df.column("idx")?.u32()?
            .into_no_null_iter()
            .map(|i| all_geoms[i as usize].clone())
            .collect::<Vec<_>>();

        debug!("[district] {}: kept {} of {} districts", source.key, geoms.len(), all_geoms.len());

        Ok(Self { source: source.clone(), data: df, geoms, mask })
    }
}

/// Union of a set of MultiPolygons (empty input gives an empty MultiPolygon).
pub(crate) fn union_all<'a>(geoms: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> MultiPolygon<f64> {
    geoms.into_iter()
        .cloned()
        .reduce(|a, b| a.union(&b))
        .unwrap_or_else(|| MultiPolygon(Vec::new()))
}

