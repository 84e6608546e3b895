//! Numerical utilities shared by the forecasting models.

pub mod optimization;
pub mod stats;

pub use optimization::{simplex_minimize, SimplexConfig, SimplexResult};
pub use stats::quantile_normal;
