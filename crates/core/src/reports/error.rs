//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A supplied date could not be parsed or lies outside the storable range.
    #[error("Invalid {field}: '{value}' is not a supported calendar date")]
    InvalidDate {
        /// Name of the offending parameter (`start_date` or `end_date`).
        field: &'static str,
        /// Raw value as received.
        value: String,
    },

    /// Record store operation failed.
    #[error("Record store error: {0}")]
    Repository(String),
}

impl ReportError {
    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field,
            value: value.into(),
        }
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
