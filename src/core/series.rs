//! Hourly power series with explicit absent slots.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Duration, Timelike, Utc};

/// A single power reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
    /// Instantaneous power draw in kilowatts, non-negative.
    pub power_kw: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(timestamp: DateTime<Utc>, power_kw: f64) -> Self {
        Self {
            timestamp,
            power_kw,
        }
    }
}

/// Truncate a timestamp to the start of its hour.
pub fn floor_to_hour(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    let secs = timestamp.timestamp();
    let floored = secs - secs.rem_euclid(3600);
    DateTime::from_timestamp(floored, 0).unwrap_or(timestamp)
}

/// A power series on a contiguous hourly grid.
///
/// One slot per hour between the first and last observation. Slots before
/// the first real observation carry no value; they are stored as `NaN` and
/// excluded from every downstream sum and mean. Filled slots hold either an
/// observed value or the forward-carried previous value.
#[derive(Debug, Clone)]
pub struct HourlySeries {
    start: DateTime<Utc>,
    values: Vec<f64>,
}

impl HourlySeries {
    /// Build a series from a grid start (hour-aligned) and per-hour values,
    /// with `NaN` marking absent slots.
    pub fn new(start: DateTime<Utc>, values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        if start != floor_to_hour(start) {
            return Err(AnalysisError::InvalidParameter(
                "series start must be hour-aligned".to_string(),
            ));
        }
        for (i, &v) in values.iter().enumerate() {
            if v.is_infinite() || (!v.is_nan() && v < 0.0) {
                return Err(AnalysisError::InvalidSample {
                    record: i,
                    reason: format!("power must be finite and non-negative, got {v}"),
                });
            }
        }
        Ok(Self { start, values })
    }

    /// Number of hourly slots, absent ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First grid hour.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Timestamp of the slot at `index`.
    pub fn timestamp(&self, index: usize) -> DateTime<Utc> {
        self.start + Duration::hours(index as i64)
    }

    /// Hour-of-day (0-23) of the slot at `index`, derived from its timestamp.
    pub fn hour_of_day(&self, index: usize) -> u32 {
        self.timestamp(index).hour()
    }

    /// Raw per-slot values; absent slots are `NaN`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether the slot at `index` holds a value.
    pub fn is_present(&self, index: usize) -> bool {
        self.values.get(index).is_some_and(|v| !v.is_nan())
    }

    /// Number of slots that hold a value.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Iterate over `(timestamp, power)` for present slots only.
    pub fn present(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, &v)| (self.timestamp(i), v))
    }

    /// Iterate over present power values.
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| !v.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn floor_to_hour_truncates_minutes_and_seconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 37, 12).unwrap();
        assert_eq!(
            floor_to_hour(ts),
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 0, 0).unwrap()
        );
        assert_eq!(floor_to_hour(hour(7)), hour(7));
    }

    #[test]
    fn series_exposes_grid_and_presence() {
        let series = HourlySeries::new(hour(0), vec![f64::NAN, 1.0, 2.0]).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.present_count(), 2);
        assert!(!series.is_present(0));
        assert!(series.is_present(1));
        assert_eq!(series.timestamp(2), hour(2));
        assert_eq!(series.hour_of_day(2), 2);

        let present: Vec<_> = series.present().collect();
        assert_eq!(present, vec![(hour(1), 1.0), (hour(2), 2.0)]);
    }

    #[test]
    fn series_rejects_empty_values() {
        let result = HourlySeries::new(hour(0), vec![]);
        assert_eq!(result.unwrap_err(), AnalysisError::EmptyInput);
    }

    #[test]
    fn series_rejects_negative_power() {
        let result = HourlySeries::new(hour(0), vec![1.0, -0.5]);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidSample { record: 1, .. })
        ));
    }

    #[test]
    fn series_rejects_unaligned_start() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap();
        let result = HourlySeries::new(start, vec![1.0]);
        assert!(matches!(result, Err(AnalysisError::InvalidParameter(_))));
    }
}
