//! Forecasting models and the monthly projection entry point.

mod diff;
mod sarima;

pub use diff::{difference, integrate, seasonal_difference, seasonal_integrate};
pub use sarima::{Sarima, SarimaSpec};

use crate::core::{next_month_end, MonthlyForecast, MonthlyRow, MonthlySeries};
use crate::error::{AnalysisError, Result};
use tracing::debug;

/// Number of future months projected.
pub const FORECAST_HORIZON: usize = 3;

/// Minimum monthly history for the seasonal model: one full seasonal cycle.
pub const MIN_HISTORY_MONTHS: usize = 12;

/// Common interface for forecasting backends.
///
/// The pipeline only depends on this trait, so the seasonal model can be
/// swapped for another backend without touching the pipeline contract.
pub trait Forecaster {
    /// Fit the model to an evenly spaced series.
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Point predictions for the given number of future periods.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Model name for diagnostics.
    fn name(&self) -> &str;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;
}

/// Project monthly energy three months ahead with the default SARIMA model.
///
/// Fails with [`AnalysisError::InsufficientHistory`] when fewer than
/// [`MIN_HISTORY_MONTHS`] rows exist; callers treat that as "skip the
/// forecast section", not as a fatal error.
pub fn forecast_monthly(history: &MonthlySeries) -> Result<MonthlyForecast> {
    let mut model = Sarima::monthly();
    forecast_monthly_with(&mut model, history)
}

/// Project monthly energy with a caller-supplied backend.
///
/// The forecast rows continue the historical month-end grid with no gap and
/// no overlap.
pub fn forecast_monthly_with(
    model: &mut dyn Forecaster,
    history: &MonthlySeries,
) -> Result<MonthlyForecast> {
    if history.len() < MIN_HISTORY_MONTHS {
        return Err(AnalysisError::InsufficientHistory {
            needed: MIN_HISTORY_MONTHS,
            got: history.len(),
        });
    }

    debug!(months = history.len(), model = model.name(), "fitting forecast model");
    model.fit(&history.energy_values())?;
    let predictions = model.predict(FORECAST_HORIZON)?;

    let mut cursor = history
        .last_month_end()
        .ok_or(AnalysisError::InsufficientData)?;
    let mut rows = Vec::with_capacity(predictions.len());
    for &energy_kwh in &predictions {
        cursor = next_month_end(cursor).ok_or_else(|| {
            AnalysisError::ForecastFit("forecast month falls outside the calendar range".to_string())
        })?;
        rows.push(MonthlyRow {
            month_end: cursor,
            energy_kwh,
        });
    }

    Ok(MonthlyForecast::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::month_end;
    use chrono::NaiveDate;

    fn monthly_history(months: usize) -> MonthlySeries {
        let mut series = MonthlySeries::new();
        let mut year = 2022;
        let mut month = 1;
        for t in 0..months {
            let season = (t % 12) as f64;
            let energy = 600.0 + 2.0 * t as f64
                + 80.0 * (season * std::f64::consts::TAU / 12.0).sin();
            series
                .push(month_end(year, month).unwrap(), energy)
                .unwrap();
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        series
    }

    #[test]
    fn eleven_months_is_insufficient_history() {
        let history = monthly_history(11);
        assert_eq!(
            forecast_monthly(&history).unwrap_err(),
            AnalysisError::InsufficientHistory { needed: 12, got: 11 }
        );
    }

    #[test]
    fn twelve_months_succeeds() {
        let history = monthly_history(12);
        let forecast = forecast_monthly(&history).unwrap();
        assert_eq!(forecast.horizon(), FORECAST_HORIZON);
    }

    #[test]
    fn forecast_continues_the_month_grid() {
        let history = monthly_history(24);
        let forecast = forecast_monthly(&history).unwrap();

        assert_eq!(forecast.horizon(), 3);
        // History ends December 2023; the forecast must start January 2024
        // and step one month at a time.
        assert_eq!(
            forecast.rows()[0].month_end,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert_eq!(
            forecast.rows()[1].month_end,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            forecast.rows()[2].month_end,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn custom_backend_is_accepted() {
        struct Flat {
            level: Option<f64>,
        }
        impl Forecaster for Flat {
            fn fit(&mut self, values: &[f64]) -> Result<()> {
                self.level = values.last().copied();
                Ok(())
            }
            fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
                let level = self.level.ok_or_else(|| {
                    AnalysisError::InvalidParameter("not fitted".to_string())
                })?;
                Ok(vec![level; horizon])
            }
            fn name(&self) -> &str {
                "Flat"
            }
            fn is_fitted(&self) -> bool {
                self.level.is_some()
            }
        }

        let history = monthly_history(12);
        let mut model = Flat { level: None };
        let forecast = forecast_monthly_with(&mut model, &history).unwrap();
        assert_eq!(forecast.horizon(), 3);
        let last = history.rows().last().unwrap().energy_kwh;
        for row in forecast.rows() {
            assert_eq!(row.energy_kwh, last);
        }
    }
}
