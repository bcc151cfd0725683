pub mod summary;

pub use summary::{MovingAverageSnapshot, SummaryStats};
