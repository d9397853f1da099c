mod fs;
mod geojson;
mod shp;

pub(crate) use fs::*;
pub(crate) use self::geojson::*;
pub(crate) use shp::*;
