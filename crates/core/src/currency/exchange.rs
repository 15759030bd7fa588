//! Exchange rate types and logic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::CurrencyCode;

use crate::error::{EngineError, EngineResult};

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: CurrencyCode,
    /// Target currency code.
    pub to_currency: CurrencyCode,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
    /// Where the rate was published, e.g. "SUNAT", "BCR".
    #[serde(default)]
    pub source: String,
}

impl ExchangeRate {
    /// Creates a new, validated exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the rate is not positive or
    /// both currencies are the same.
    pub fn new(
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
        rate: Decimal,
        effective_date: NaiveDate,
        source: impl Into<String>,
    ) -> EngineResult<Self> {
        let rate = Self {
            from_currency,
            to_currency,
            rate,
            effective_date,
            source: source.into(),
        };
        rate.validate()?;
        Ok(rate)
    }

    /// Checks the rate's invariants.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the rate is not positive or
    /// both currencies are the same.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rate <= Decimal::ZERO {
            return Err(EngineError::invalid(format!(
                "exchange rate must be positive, got {}",
                self.rate
            )));
        }
        if self.from_currency == self.to_currency {
            return Err(EngineError::invalid(format!(
                "exchange rate currencies must differ, got {0}/{0}",
                self.from_currency
            )));
        }
        Ok(())
    }

    /// Returns true if this rate converts `from` into `to`.
    #[must_use]
    pub fn is_pair(&self, from: CurrencyCode, to: CurrencyCode) -> bool {
        self.from_currency == from && self.to_currency == to
    }
}
