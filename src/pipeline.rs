//! One-shot analysis pipeline: normalize, aggregate, detect idle, forecast,
//! price, and advise.

use crate::analysis::{
    advise, hourly_profile, idle_summary, monthly_totals, summary_stats, AdvisorInput, CostFigure,
    Currency, HourlyProfile, IdleSummary, SummaryStats,
};
use crate::core::{MonthlyForecast, MonthlySeries, Sample};
use crate::error::{AnalysisError, Result};
use crate::models::forecast_monthly;
use crate::normalize::normalize;
use tracing::{debug, info};

/// Immutable per-run configuration.
///
/// There is no ambient state: parameter changes mean building a new config
/// and re-running the analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Power below this is idle, in kW. Typical values sit in `[0.01, 0.2]`.
    pub idle_threshold_kw: f64,
    /// Billing currency.
    pub currency: Currency,
    /// Per-kWh rate; defaults to the currency's standard tariff.
    pub rate: f64,
}

impl AnalysisConfig {
    /// Config for the given currency with its default rate and a 0.05 kW
    /// idle threshold.
    pub fn new(currency: Currency) -> Self {
        Self {
            idle_threshold_kw: 0.05,
            currency,
            rate: currency.default_rate(),
        }
    }

    /// Override the per-kWh rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Override the idle threshold.
    pub fn with_idle_threshold(mut self, threshold_kw: f64) -> Self {
        self.idle_threshold_kw = threshold_kw;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Global statistics over present hours.
    pub stats: SummaryStats,
    /// Total energy priced at the configured rate.
    pub cost: CostFigure,
    /// Idle segmentation at the configured threshold.
    pub idle: IdleSummary,
    /// Mean power per hour-of-day.
    pub hourly_profile: HourlyProfile,
    /// Monthly energy totals.
    pub monthly: MonthlySeries,
    /// Three-month projection; `None` when the history is shorter than one
    /// seasonal cycle.
    pub forecast: Option<MonthlyForecast>,
    /// Advisory messages in rule order.
    pub advice: Vec<String>,
}

/// Run the full pipeline over one dataset with one set of parameters.
///
/// Insufficient monthly history only suppresses the forecast section; every
/// other failure aborts the run with no partial output.
pub fn analyze(samples: &[Sample], config: &AnalysisConfig) -> Result<AnalysisReport> {
    let series = normalize(samples)?;

    let stats = summary_stats(&series)?;
    let profile = hourly_profile(&series);
    let monthly = monthly_totals(&series)?;
    let idle = idle_summary(&series, config.idle_threshold_kw)?;

    let forecast = match forecast_monthly(&monthly) {
        Ok(forecast) => Some(forecast),
        Err(AnalysisError::InsufficientHistory { needed, got }) => {
            debug!(needed, got, "skipping forecast: not enough monthly history");
            None
        }
        Err(other) => return Err(other),
    };

    let cost = CostFigure::new(stats.total_kwh, config.rate, config.currency);
    let advice = advise(&AdvisorInput {
        idle_ratio_pct: idle.ratio_pct,
        total_cost: cost.amount(),
        rate: config.rate,
        total_energy_kwh: stats.total_kwh,
        month_count: monthly.len(),
        mean_power_kw: stats.mean_kw,
    });

    info!(
        hours = stats.present_hours,
        months = monthly.len(),
        forecast = forecast.is_some(),
        advisories = advice.len(),
        "analysis run complete"
    );

    Ok(AnalysisReport {
        stats,
        cost,
        idle,
        hourly_profile: profile,
        monthly,
        forecast,
        advice,
    })
}
