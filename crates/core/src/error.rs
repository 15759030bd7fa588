//! Engine error types.
//!
//! Every failure of the engine is deterministic: the same input always yields
//! the same error, so none of these are retryable.

use chrono::NaiveDate;
use thiserror::Error;
use tourdesk_shared::AppError;
use tourdesk_shared::types::{CurrencyCode, MoneyError};

/// Result type alias using `EngineError`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the pricing, tax, currency and document rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input (negative amount, rate outside [0,1), bad date range...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No exchange rate exists for the pair on or before the requested date.
    #[error("No exchange rate found for {from}/{to} on or before {date}")]
    RateNotFound {
        /// Source currency.
        from: CurrencyCode,
        /// Target currency.
        to: CurrencyCode,
        /// Date the conversion was requested for.
        date: NaiveDate,
    },

    /// Unsupported document type or a value that cannot be normalized/validated.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Arithmetic between two amounts in different currencies.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Currency that was expected.
        expected: CurrencyCode,
        /// Currency that was supplied.
        got: CurrencyCode,
    },
}

impl EngineError {
    /// Shorthand for `InvalidArgument`.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::RateNotFound { .. } => "RATE_NOT_FOUND",
            Self::InvalidDocument(_) => "INVALID_DOCUMENT",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
        }
    }
}

impl From<MoneyError> for EngineError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::CurrencyMismatch { expected, got } => {
                Self::CurrencyMismatch { expected, got }
            }
            MoneyError::InvalidCurrency(_) | MoneyError::Overflow => {
                Self::InvalidArgument(err.to_string())
            }
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::RateNotFound { .. } => Self::NotFound(err.to_string()),
            EngineError::InvalidArgument(_)
            | EngineError::InvalidDocument(_)
            | EngineError::CurrencyMismatch { .. } => Self::Validation(err.to_string()),
        }
    }
}
