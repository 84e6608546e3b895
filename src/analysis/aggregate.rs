//! Calendar-grouped summaries of the hourly series.
//!
//! All aggregations ignore absent slots; a leading unobserved stretch must
//! not bias sums or means towards zero.

use crate::core::{month_end, HourlySeries, MonthlySeries};
use crate::error::{AnalysisError, Result};
use chrono::{Datelike, Timelike};
use itertools::Itertools;

/// Global descriptive statistics over present slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    /// Mean power across present hours, in kW.
    pub mean_kw: f64,
    /// Maximum power, in kW.
    pub max_kw: f64,
    /// Minimum power, in kW.
    pub min_kw: f64,
    /// Total energy: the sum of hourly power readings, in kWh.
    pub total_kwh: f64,
    /// Number of present hourly slots.
    pub present_hours: usize,
}

/// Mean power per hour-of-day.
///
/// An hour maps to `None` exactly when no present slot falls on it.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyProfile {
    means: [Option<f64>; 24],
}

impl HourlyProfile {
    /// Mean power for the given hour-of-day, if any sample falls on it.
    pub fn mean(&self, hour: usize) -> Option<f64> {
        self.means.get(hour).copied().flatten()
    }

    /// Iterate over `(hour, mean)` for hours that have data.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.means
            .iter()
            .enumerate()
            .filter_map(|(h, m)| m.map(|v| (h as u32, v)))
    }

    /// Number of hours-of-day that have data.
    pub fn covered_hours(&self) -> usize {
        self.means.iter().filter(|m| m.is_some()).count()
    }
}

/// Compute global statistics over present slots.
///
/// Fails with [`AnalysisError::InsufficientData`] when every slot is absent.
pub fn summary_stats(series: &HourlySeries) -> Result<SummaryStats> {
    let mut count = 0usize;
    let mut total = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for value in series.present_values() {
        count += 1;
        total += value;
        max = max.max(value);
        min = min.min(value);
    }

    if count == 0 {
        return Err(AnalysisError::InsufficientData);
    }

    Ok(SummaryStats {
        mean_kw: total / count as f64,
        max_kw: max,
        min_kw: min,
        total_kwh: total,
        present_hours: count,
    })
}

/// Mean power grouped by hour-of-day over present slots.
pub fn hourly_profile(series: &HourlySeries) -> HourlyProfile {
    let mut sums = [0.0f64; 24];
    let mut counts = [0usize; 24];

    for (timestamp, value) in series.present() {
        let hour = timestamp.hour() as usize;
        sums[hour] += value;
        counts[hour] += 1;
    }

    let mut means = [None; 24];
    for hour in 0..24 {
        if counts[hour] > 0 {
            means[hour] = Some(sums[hour] / counts[hour] as f64);
        }
    }

    HourlyProfile { means }
}

/// Sum present hourly energy per calendar month, one row per month spanned.
///
/// Fails with [`AnalysisError::InsufficientData`] when every slot is absent.
pub fn monthly_totals(series: &HourlySeries) -> Result<MonthlySeries> {
    let mut monthly = MonthlySeries::new();

    let groups = series
        .present()
        .chunk_by(|(timestamp, _)| (timestamp.year(), timestamp.month()));

    for ((year, month), group) in &groups {
        let energy: f64 = group.map(|(_, value)| value).sum();
        let end = month_end(year, month).ok_or_else(|| {
            AnalysisError::InvalidParameter(format!("month out of range: {year}-{month:02}"))
        })?;
        monthly.push(end, energy)?;
    }

    if monthly.is_empty() {
        return Err(AnalysisError::InsufficientData);
    }
    Ok(monthly)
}
