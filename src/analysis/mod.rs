//! Descriptive analysis over the normalized series: grouped aggregation,
//! idle detection, cost conversion, and rule-based advice.

mod advisor;
mod aggregate;
mod cost;
mod idle;

pub use advisor::{advise, AdvisorInput};
pub use aggregate::{hourly_profile, monthly_totals, summary_stats, HourlyProfile, SummaryStats};
pub use cost::{cost, CostFigure, Currency};
pub use idle::{idle_summary, IdleSummary};
