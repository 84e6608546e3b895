//! Core data structures: hourly power series and monthly aggregates.

mod monthly;
mod series;

pub use monthly::{month_end, next_month_end, MonthlyForecast, MonthlyRow, MonthlySeries};
pub use series::{floor_to_hour, HourlySeries, Sample};
