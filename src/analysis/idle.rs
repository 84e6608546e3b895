//! Idle/standby segmentation of the hourly series.

use crate::core::HourlySeries;
use crate::error::{AnalysisError, Result};

/// Share and energy of samples below the idle threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleSummary {
    /// Percentage of present samples below the threshold, in `[0, 100]`.
    pub ratio_pct: f64,
    /// Summed power of idle samples, in kWh.
    pub energy_kwh: f64,
}

/// Partition present samples at `threshold_kw` and summarize the idle side.
///
/// Idle means strictly below the threshold. Pure function of the series and
/// the threshold, so callers can sweep thresholds over one normalized series
/// without renormalizing.
pub fn idle_summary(series: &HourlySeries, threshold_kw: f64) -> Result<IdleSummary> {
    if !threshold_kw.is_finite() || threshold_kw < 0.0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "idle threshold must be finite and non-negative, got {threshold_kw}"
        )));
    }

    let mut present = 0usize;
    let mut idle = 0usize;
    let mut energy = 0.0;
    for value in series.present_values() {
        present += 1;
        if value < threshold_kw {
            idle += 1;
            energy += value;
        }
    }

    if present == 0 {
        return Err(AnalysisError::InsufficientData);
    }

    Ok(IdleSummary {
        ratio_pct: idle as f64 / present as f64 * 100.0,
        energy_kwh: energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn series(values: Vec<f64>) -> HourlySeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        HourlySeries::new(start, values).unwrap()
    }

    #[test]
    fn no_idle_when_all_above_threshold() {
        let s = series(vec![1.0; 48]);
        let idle = idle_summary(&s, 0.5).unwrap();
        assert_relative_eq!(idle.ratio_pct, 0.0);
        assert_relative_eq!(idle.energy_kwh, 0.0);
    }

    #[test]
    fn quarter_idle_day() {
        // Hours 0-5 at 0.01 kW, hours 6-23 at 2.0 kW.
        let mut values = vec![0.01; 6];
        values.extend(vec![2.0; 18]);
        let idle = idle_summary(&series(values), 0.05).unwrap();

        assert_relative_eq!(idle.ratio_pct, 25.0);
        assert_relative_eq!(idle.energy_kwh, 0.06, epsilon = 1e-12);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let idle = idle_summary(&series(vec![0.5, 0.49, 0.51]), 0.5).unwrap();
        assert_relative_eq!(idle.ratio_pct, 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn absent_slots_are_excluded() {
        let idle = idle_summary(&series(vec![f64::NAN, 0.0, 1.0]), 0.5).unwrap();
        assert_relative_eq!(idle.ratio_pct, 50.0);
    }

    #[test]
    fn idle_energy_bounded_by_total() {
        let values: Vec<f64> = (0..100).map(|i| (i % 10) as f64 * 0.1).collect();
        let s = series(values.clone());
        let idle = idle_summary(&s, 0.35).unwrap();

        let total: f64 = values.iter().sum();
        assert!(idle.energy_kwh <= total);
        assert!((0.0..=100.0).contains(&idle.ratio_pct));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let s = series(vec![1.0]);
        assert!(matches!(
            idle_summary(&s, -0.1),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn all_absent_series_is_insufficient() {
        let s = series(vec![f64::NAN, f64::NAN]);
        assert_eq!(
            idle_summary(&s, 0.5).unwrap_err(),
            AnalysisError::InsufficientData
        );
    }
}
