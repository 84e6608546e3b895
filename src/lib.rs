//! # wattscope
//!
//! Power-consumption analytics over timestamped meter readings.
//!
//! Takes irregular power samples, resamples them onto an hourly grid,
//! and derives consumption statistics, idle detection, a three-month
//! SARIMA forecast, cost figures, and advisory messages.

#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod core;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod utils;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::analysis::{CostFigure, Currency, HourlyProfile, IdleSummary, SummaryStats};
    pub use crate::core::{HourlySeries, MonthlyForecast, MonthlySeries, Sample};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::models::{forecast_monthly, Forecaster, Sarima};
    pub use crate::pipeline::{analyze, AnalysisConfig, AnalysisReport};
}
