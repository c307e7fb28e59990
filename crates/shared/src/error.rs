//! Application-wide error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Invariant violations raised when constructing value objects and records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A money field that must be non-negative was negative.
    #[error("{field} must be >= 0, got {amount}")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected amount.
        amount: Decimal,
    },

    /// A percentage outside `[0, 1]`.
    #[error("Percentage must be in [0,1], got {0}")]
    PercentageOutOfRange(Decimal),

    /// Malformed month key.
    #[error("MonthKey must be in YYYY-MM format, got {0:?}")]
    InvalidMonthKey(String),

    /// Malformed quarter key.
    #[error("QuarterKey must be in YYYY-QN format, got {0:?}")]
    InvalidQuarterKey(String),

    /// Malformed decimal literal.
    #[error("Invalid decimal: {0:?}")]
    InvalidDecimal(String),

    /// Malformed record key.
    #[error("Invalid record key: {0:?}")]
    InvalidRecordKey(String),

    /// A date whose month cannot be written as `YYYY-MM`.
    #[error("{field} must fall in years 0000..=9999, got {date}")]
    DateOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected date.
        date: NaiveDate,
    },

    /// A required identifier was blank.
    #[error("{0} must not be blank")]
    BlankIdentifier(&'static str),
}

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., duplicate record key).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record source failure.
    #[error("Record source error: {0}")]
    Source(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Configuration(_) | Self::Source(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Source(_) => "RECORD_SOURCE_ERROR",
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
