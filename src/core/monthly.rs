//! Monthly energy aggregates and forecast rows.

use crate::error::{AnalysisError, Result};
use chrono::{Datelike, NaiveDate};

/// Last calendar day of the given month.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
}

/// Month-end date of the calendar month following `date`'s month.
pub fn next_month_end(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    month_end(year, month)
}

/// One month of summed energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRow {
    /// Last day of the calendar month.
    pub month_end: NaiveDate,
    /// Energy consumed within the month, in kWh.
    pub energy_kwh: f64,
}

/// Chronologically ordered monthly energy totals, one row per calendar month
/// spanned by the series.
#[derive(Debug, Clone, Default)]
pub struct MonthlySeries {
    rows: Vec<MonthlyRow>,
}

impl MonthlySeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows, validating chronological order.
    pub fn from_rows(rows: Vec<MonthlyRow>) -> Result<Self> {
        for pair in rows.windows(2) {
            if pair[1].month_end <= pair[0].month_end {
                return Err(AnalysisError::InvalidParameter(
                    "monthly rows must be strictly chronological".to_string(),
                ));
            }
        }
        Ok(Self { rows })
    }

    /// Append a month. Rows must stay chronological.
    pub fn push(&mut self, month_end: NaiveDate, energy_kwh: f64) -> Result<()> {
        if let Some(last) = self.rows.last() {
            if month_end <= last.month_end {
                return Err(AnalysisError::InvalidParameter(
                    "monthly rows must be strictly chronological".to_string(),
                ));
            }
        }
        self.rows.push(MonthlyRow {
            month_end,
            energy_kwh,
        });
        Ok(())
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in chronological order.
    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    /// Energy values in row order.
    pub fn energy_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.energy_kwh).collect()
    }

    /// Month-end of the last row, if any.
    pub fn last_month_end(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.month_end)
    }

    /// Sum of all monthly energies.
    pub fn total_energy_kwh(&self) -> f64 {
        self.rows.iter().map(|r| r.energy_kwh).sum()
    }
}

/// Projected monthly energy, continuing the historical month-end grid with
/// no gap and no overlap.
#[derive(Debug, Clone)]
pub struct MonthlyForecast {
    rows: Vec<MonthlyRow>,
}

impl MonthlyForecast {
    pub(crate) fn from_rows(rows: Vec<MonthlyRow>) -> Self {
        Self { rows }
    }

    /// Forecast rows in chronological order.
    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    /// Number of projected months.
    pub fn horizon(&self) -> usize {
        self.rows.len()
    }
}
