pub mod reducers;
pub mod composer;
pub mod pipeline;

pub use composer::{compose, DerivedMetrics};
pub use pipeline::AnalyticsPipeline;

/// One decimal place, the precision every rounded field in the report uses.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
