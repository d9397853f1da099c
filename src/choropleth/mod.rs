mod layer;
mod scale;

pub use layer::TractLayer;
pub use scale::{Metric, MetricScale, NUM_BUCKETS, RAMP};
