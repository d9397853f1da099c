#![doc = "Interactive district comparison maps"]
pub mod cli;
pub mod commands;
mod common;
pub mod config;
pub mod choropleth;
pub mod district;
pub mod html;
pub mod map;
pub mod palette;

#[doc(inline)]
pub use commands::build::build_map;

#[doc(inline)]
pub use config::{Bounds, MapConfig, MapSource};

#[doc(inline)]
pub use map::InteractiveMap;
