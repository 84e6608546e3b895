//! Delimited-text ingestion of power readings.
//!
//! Input is a headered document with a `timestamp` column and a `power_kW`
//! column. Records may be out of order; they are sorted on ingest. A single
//! malformed record fails the whole ingest, since dropping records silently
//! would corrupt downstream energy totals.

use crate::core::Sample;
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Accepted datetime layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    #[serde(rename = "power_kW")]
    power_kw: f64,
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }
    // Date-only readings are taken at midnight.
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Read samples from any delimited-text reader.
///
/// Returns samples sorted by timestamp; exact duplicate timestamps keep the
/// last record seen.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (index, record) in csv_reader.deserialize::<RawRecord>().enumerate() {
        // Record numbers are 1-based and exclude the header.
        let record_number = index + 1;
        let raw = record.map_err(|e| AnalysisError::InvalidSample {
            record: record_number,
            reason: e.to_string(),
        })?;

        let timestamp =
            parse_timestamp(&raw.timestamp).ok_or_else(|| AnalysisError::InvalidSample {
                record: record_number,
                reason: format!("unparseable timestamp: {:?}", raw.timestamp),
            })?;

        if !raw.power_kw.is_finite() || raw.power_kw < 0.0 {
            return Err(AnalysisError::InvalidSample {
                record: record_number,
                reason: format!("power must be finite and non-negative, got {}", raw.power_kw),
            });
        }

        samples.push(Sample::new(timestamp, raw.power_kw));
    }

    samples.sort_by_key(|s| s.timestamp);
    // Last record wins on exact timestamp collisions.
    samples.reverse();
    samples.dedup_by_key(|s| s.timestamp);
    samples.reverse();

    debug!(count = samples.len(), "ingested samples");
    Ok(samples)
}

/// Read samples from a file on disk.
pub fn read_samples_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        AnalysisError::InvalidParameter(format!(
            "cannot open {}: {e}",
            path.as_ref().display()
        ))
    })?;
    read_samples(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reads_well_formed_document() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 00:00:00,1.5\n\
                    2024-01-01 01:00:00,2.0\n";
        let samples = read_samples(data.as_bytes()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(samples[0].power_kw, 1.5);
        assert_eq!(samples[1].power_kw, 2.0);
    }

    #[test]
    fn sorts_out_of_order_records() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 02:00:00,3.0\n\
                    2024-01-01 00:00:00,1.0\n\
                    2024-01-01 01:00:00,2.0\n";
        let samples = read_samples(data.as_bytes()).unwrap();

        let powers: Vec<f64> = samples.iter().map(|s| s.power_kw).collect();
        assert_eq!(powers, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn last_record_wins_on_duplicate_timestamps() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 00:00:00,1.0\n\
                    2024-01-01 00:00:00,9.0\n";
        let samples = read_samples(data.as_bytes()).unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].power_kw, 9.0);
    }

    #[test]
    fn accepts_multiple_datetime_layouts() {
        let data = "timestamp,power_kW\n\
                    2024-01-01T00:00:00,1.0\n\
                    2024-01-01 01:00,2.0\n\
                    02/01/2024 00:00,3.0\n";
        let samples = read_samples(data.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(
            samples[2].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn malformed_timestamp_fails_whole_ingest() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 00:00:00,1.0\n\
                    not-a-date,2.0\n";
        let err = read_samples(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSample { record: 2, .. }));
    }

    #[test]
    fn negative_power_fails_whole_ingest() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 00:00:00,-0.2\n";
        let err = read_samples(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSample { record: 1, .. }));
    }

    #[test]
    fn non_numeric_power_fails_whole_ingest() {
        let data = "timestamp,power_kW\n\
                    2024-01-01 00:00:00,abc\n";
        let err = read_samples(data.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSample { record: 1, .. }));
    }

    #[test]
    fn empty_document_yields_no_samples() {
        let data = "timestamp,power_kW\n";
        let samples = read_samples(data.as_bytes()).unwrap();
        assert!(samples.is_empty());
    }
}
