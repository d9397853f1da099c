use std::{collections::HashMap, fmt};

use anyhow::{anyhow, ensure, Result};
use polars::{frame::DataFrame, prelude::Column};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use super::Colormap;
use crate::district::DISTRICT_COLUMN;

/// How a district relates to the districts ruled unconstitutional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistrictStatus {
    Affected,
    Adjacent,
}

impl DistrictStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DistrictStatus::Affected => "Ruled unconstitutional as enacted",
            DistrictStatus::Adjacent => "Adjacent to a district ruled unconstitutional",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [DistrictStatus::Affected, DistrictStatus::Adjacent].into_iter()
            .find(|status| status.label() == label)
    }
}

impl fmt::Display for DistrictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

/// A manual correction applied after the shuffled assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorOverride {
    /// Set an explicit hex color.
    Hex { district: u32, color: String },
    /// Reuse the (current) color of another district.
    CopyFrom { district: u32, from: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub district: String,
    pub status: DistrictStatus,
    pub color: String,
}

/// Immutable district id -> {status, color} table, in affected-then-adjacent order.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    index: HashMap<String, usize>,
}

impl Palette {
    /// Sample the colormap once per district, shuffle with `seed`, assign in
    /// id order (affected first), then apply `overrides` in order.
    pub fn build(
        colormap: &Colormap,
        affected: &[u32],
        adjacent: &[u32],
        seed: u64,
        overrides: &[ColorOverride],
    ) -> Result<Self> {
        let mut colors = colormap.sample(affected.len() + adjacent.len());
        colors.shuffle(&mut StdRng::seed_from_u64(seed));

        let statuses = affected.iter().map(|&d| (d, DistrictStatus::Affected))
            .chain(adjacent.iter().map(|&d| (d, DistrictStatus::Adjacent)));

        let mut palette = Self { entries: Vec::with_capacity(colors.len()), index: HashMap::new() };
        for ((district, status), color) in statuses.zip(colors) {
            let district = district.to_string();
            ensure!(!palette.index.contains_key(&district),
                "[palette] district {} is listed more than once", district);
            palette.index.insert(district.clone(), palette.entries.len());
            palette.entries.push(PaletteEntry { district, status, color: color.to_string() });
        }

        for patch in overrides {
            palette.apply(patch)?;
        }

        Ok(palette)
    }

    fn apply(&mut self, patch: &ColorOverride) -> Result<()> {
        let (district, color) = match patch {
            ColorOverride::Hex { district, color } => {
                ensure!(is_hex_color(color), "[palette] override for {} is not #RRGGBB: {:?}", district, color);
                (*district, color.clone())
            }
            ColorOverride::CopyFrom { district, from } => {
                let color = self.color(&from.to_string())
                    .ok_or_else(|| anyhow!("[palette] override source district {} has no color", from))?;
                (*district, color.to_string())
            }
        };

        let &i = self.index.get(&district.to_string())
            .ok_or_else(|| anyhow!("[palette] override target district {} is not in the palette", district))?;
        self.entries[i].color = color;
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline] pub fn entries(&self) -> &[PaletteEntry] { &self.entries }

    #[inline] pub fn contains(&self, district: &str) -> bool { self.index.contains_key(district) }

    pub fn get(&self, district: &str) -> Option<&PaletteEntry> {
        self.index.get(district).map(|&i| &self.entries[i])
    }

    pub fn color(&self, district: &str) -> Option<&str> {
        self.get(district).map(|entry| entry.color.as_str())
    }

    /// Table form used for joining onto district layers.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        Ok(DataFrame::new(vec![
            Column::new(DISTRICT_COLUMN.into(),
                self.entries.iter().map(|e| e.district.as_str()).collect::<Vec<_>>()),
            Column::new("status".into(),
                self.entries.iter().map(|e| e.status.label()).collect::<Vec<_>>()),
            Column::new("color".into(),
                self.entries.iter().map(|e| e.color.as_str()).collect::<Vec<_>>()),
        ])?)
    }
}

/// Check for a `#RRGGBB` color string.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
