//! Series normalization onto a contiguous hourly grid.

use crate::core::{floor_to_hour, HourlySeries, Sample};
use crate::error::{AnalysisError, Result};
use chrono::Duration;
use tracing::debug;

/// Reindex samples onto the hourly grid spanning the full input range.
///
/// Each grid slot takes the observed value for its hour (the last one, when
/// several samples fall within the same hour), otherwise the forward-carried
/// most recent value. Slots before the first observation have nothing to
/// carry and stay absent; downstream aggregations exclude them rather than
/// treating them as zero.
pub fn normalize(samples: &[Sample]) -> Result<HourlySeries> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    for (i, sample) in samples.iter().enumerate() {
        if !sample.power_kw.is_finite() || sample.power_kw < 0.0 {
            return Err(AnalysisError::InvalidSample {
                record: i,
                reason: format!(
                    "power must be finite and non-negative, got {}",
                    sample.power_kw
                ),
            });
        }
    }

    let mut min_hour = floor_to_hour(samples[0].timestamp);
    let mut max_hour = min_hour;
    for sample in &samples[1..] {
        let hour = floor_to_hour(sample.timestamp);
        min_hour = min_hour.min(hour);
        max_hour = max_hour.max(hour);
    }

    let slots = ((max_hour - min_hour).num_hours() as usize) + 1;
    let mut values = vec![f64::NAN; slots];

    // Later samples overwrite earlier ones within the same hour.
    for sample in samples {
        let index = (floor_to_hour(sample.timestamp) - min_hour).num_hours() as usize;
        values[index] = sample.power_kw;
    }

    let observed = values.iter().filter(|v| !v.is_nan()).count();

    let mut carried = f64::NAN;
    for value in &mut values {
        if value.is_nan() {
            *value = carried;
        } else {
            carried = *value;
        }
    }

    debug!(
        slots,
        observed,
        filled = slots - observed,
        start = %min_hour,
        "normalized series onto hourly grid"
    );

    debug_assert_eq!(max_hour, min_hour + Duration::hours(slots as i64 - 1));
    HourlySeries::new(min_hour, values)
}
