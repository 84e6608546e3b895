//! Error types for the wattscope library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during an analysis run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input sample sequence is empty.
    #[error("empty input data")]
    EmptyInput,

    /// A record failed validation during ingest (malformed timestamp or
    /// negative power). One bad record fails the whole ingest; dropping it
    /// silently would corrupt energy totals.
    #[error("invalid sample at record {record}: {reason}")]
    InvalidSample { record: usize, reason: String },

    /// No present values remain after normalization.
    #[error("insufficient data: no present values in series")]
    InsufficientData,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Fewer monthly points than the seasonal model needs. Recoverable:
    /// the caller skips the forecast section rather than aborting the run.
    #[error("insufficient history: need at least {needed} monthly points, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// Model fitting failed to converge.
    #[error("forecast fit error: {0}")]
    ForecastFit(String),
}
