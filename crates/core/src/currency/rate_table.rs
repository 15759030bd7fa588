//! Rate reader interface and an in-memory rate table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tourdesk_shared::types::CurrencyCode;

use super::exchange::ExchangeRate;
use crate::error::{EngineError, EngineResult};

/// Read access to historical exchange rates.
///
/// Implementations return the most recent rate for `(from, to)` whose
/// effective date is on or before `on_or_before`, or `None`.
pub trait RateReader {
    /// Most recent rate for the pair effective on or before the date.
    fn rate_on_or_before(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        on_or_before: NaiveDate,
    ) -> Option<ExchangeRate>;
}

impl<F> RateReader for F
where
    F: Fn(CurrencyCode, CurrencyCode, NaiveDate) -> Option<ExchangeRate>,
{
    fn rate_on_or_before(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        on_or_before: NaiveDate,
    ) -> Option<ExchangeRate> {
        self(from, to, on_or_before)
    }
}

/// In-memory table of exchange rates, unique per (from, to, effective date).
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: BTreeMap<(CurrencyCode, CurrencyCode), BTreeMap<NaiveDate, ExchangeRate>>,
}

impl RateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list of rates.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid or duplicate rate.
    pub fn from_rates(rates: impl IntoIterator<Item = ExchangeRate>) -> EngineResult<Self> {
        let mut table = Self::new();
        for rate in rates {
            table.insert(rate)?;
        }
        Ok(table)
    }

    /// Inserts a new rate.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the rate is invalid or a rate
    /// already exists for the same pair and date.
    pub fn insert(&mut self, rate: ExchangeRate) -> EngineResult<()> {
        rate.validate()?;
        let by_date = self
            .rates
            .entry((rate.from_currency, rate.to_currency))
            .or_default();
        if by_date.contains_key(&rate.effective_date) {
            return Err(EngineError::invalid(format!(
                "exchange rate for {}/{} on {} already exists",
                rate.from_currency, rate.to_currency, rate.effective_date
            )));
        }
        by_date.insert(rate.effective_date, rate);
        Ok(())
    }

    /// Inserts a rate, replacing any rate for the same pair and date.
    ///
    /// Returns the replaced rate, if any.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the rate is invalid.
    pub fn upsert(&mut self, rate: ExchangeRate) -> EngineResult<Option<ExchangeRate>> {
        rate.validate()?;
        Ok(self
            .rates
            .entry((rate.from_currency, rate.to_currency))
            .or_default()
            .insert(rate.effective_date, rate))
    }

    /// Most recent rate for the pair regardless of date.
    #[must_use]
    pub fn latest(&self, from: CurrencyCode, to: CurrencyCode) -> Option<&ExchangeRate> {
        self.rates
            .get(&(from, to))
            .and_then(|by_date| by_date.values().next_back())
    }

    /// Number of rates in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the table holds no rates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RateReader for RateTable {
    fn rate_on_or_before(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        on_or_before: NaiveDate,
    ) -> Option<ExchangeRate> {
        self.rates
            .get(&(from, to))
            .and_then(|by_date| by_date.range(..=on_or_before).next_back())
            .map(|(_, rate)| rate.clone())
    }
}
