//! Sampled continuous colormaps.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build from unit-interval channels, truncating (0.999 -> 254, not 255).
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        #[inline] fn channel(x: f64) -> u8 { (x.clamp(0.0, 1.0) * 255.0) as u8 }
        Self { r: channel(r), g: channel(g), b: channel(b) }
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #RRGGBB
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A colormap defined by linearly interpolated (position, rgb) nodes and
/// resolved through a fixed-size lookup table.
#[derive(Clone, Debug)]
pub struct Colormap {
    lut: Vec<[f64; 3]>,
}

/// Number of lookup-table entries.
const LUT_SIZE: usize = 256;

/// Nodes of the `gist_rainbow` colormap.
const GIST_RAINBOW: &[(f64, [f64; 3])] = &[
    (0.000, [1.00, 0.00, 0.16]),
    (0.030, [1.00, 0.00, 0.00]),
    (0.215, [1.00, 1.00, 0.00]),
    (0.400, [0.00, 1.00, 0.00]),
    (0.586, [0.00, 1.00, 1.00]),
    (0.770, [0.00, 0.00, 1.00]),
    (0.954, [1.00, 0.00, 1.00]),
    (1.000, [1.00, 0.00, 0.75]),
];

impl Colormap {
    /// Build a colormap from nodes sorted by position, spanning 0.0 to 1.0.
    pub fn from_nodes(nodes: &[(f64, [f64; 3])]) -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| interpolate(nodes, i as f64 / (LUT_SIZE - 1) as f64))
            .collect();
        Self { lut }
    }

    pub fn gist_rainbow() -> Self { Self::from_nodes(GIST_RAINBOW) }

    /// Look up `x` in [0, 1]; values map to entry floor(x * N), clamped.
    pub fn get(&self, x: f64) -> Rgb {
        let n = self.lut.len();
        let index = if x.is_nan() || x < 0.0 { 0 } else { ((x * n as f64) as usize).min(n - 1) };
        let [r, g, b] = self.lut[index];
        Rgb::from_unit(r, g, b)
    }

    /// Sample `count` evenly spaced colors across the full domain.
    pub fn sample(&self, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.get(0.0)],
            _ => (0..count).map(|i| self.get(i as f64 / (count - 1) as f64)).collect(),
        }
    }
}

/// Linear interpolation between the two nodes surrounding `x`.
fn interpolate(nodes: &[(f64, [f64; 3])], x: f64) -> [f64; 3] {
    let upper = nodes.iter().position(|&(pos, _)| pos >= x).unwrap_or(nodes.len() - 1);
    if upper == 0 { return nodes[0].1 }

    let (x0, c0) = nodes[upper - 1];
    let (x1, c1) = nodes[upper];
    let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 1.0 };
    [0, 1, 2].map(|k| (c0[k] + t * (c1[k] - c0[k])).clamp(0.0, 1.0))
}
