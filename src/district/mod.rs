mod build;

use anyhow::Result;
use geo::MultiPolygon;
use polars::frame::DataFrame;

use crate::{config::MapSource, palette::DistrictStatus};

pub(crate) use build::union_all;

/// Common name of the district id column, whatever a source calls it.
pub const DISTRICT_COLUMN: &str = "district_no";

/// One district plan, filtered to the palette's districts and colored.
#[derive(Debug, Clone)]
pub struct DistrictLayer {
    source: MapSource,
    data: DataFrame, // idx, district_no, status, color, Empty
    geoms: Vec<MultiPolygon<f64>>,
    mask: Option<MultiPolygon<f64>>,
}

/// A row of a district layer, borrowed for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictRecord<'a> {
    pub district: &'a str,
    pub status: Option<DistrictStatus>,
    pub color: Option<&'a str>,
    pub geometry: &'a MultiPolygon<f64>,
}

impl DistrictLayer {
    #[inline] pub fn source(&self) -> &MapSource { &self.source }

    #[inline] pub fn data(&self) -> &DataFrame { &self.data }

    #[inline] pub fn geoms(&self) -> &[MultiPolygon<f64>] { &self.geoms }

    #[inline] pub fn len(&self) -> usize { self.geoms.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.geoms.is_empty() }

    /// Union of the districts outside the palette (mask sources only).
    #[inline] pub fn mask(&self) -> Option<&MultiPolygon<f64>> { self.mask.as_ref() }

    /// Districts in file order with their palette status and color.
    pub fn records(&self) -> Result<Vec<DistrictRecord<'_>>> {
        let districts = self.data.column(DISTRICT_COLUMN)?.str()?;
        let statuses = self.data.column("status")?.str()?;
        let colors = self.data.column("color")?.str()?;

        Ok(districts.into_iter()
            .zip(statuses)
            .zip(colors)
            .zip(&self.geoms)
            .map(|(((district, status), color), geometry)| DistrictRecord {
                district: district.unwrap_or_default(),
                status: status.and_then(DistrictStatus::from_label),
                color,
                geometry,
            })
            .collect())
    }
}
