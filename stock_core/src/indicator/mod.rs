pub mod engine;
pub mod indicator_set;

pub use engine::{compute_indicators, IndicatorEngine};
pub use indicator_set::IndicatorSet;
