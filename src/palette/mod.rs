mod colormap;
mod palette;

pub use colormap::{Colormap, Rgb};
pub use palette::{is_hex_color, ColorOverride, DistrictStatus, Palette, PaletteEntry};
