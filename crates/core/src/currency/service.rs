//! Currency converter bound to a rate reader.
//!
//! This module provides the service interface the application holds on to:
//! a converter owning (or borrowing) its rate source, with convenience
//! methods on top of [`convert`].

use chrono::NaiveDate;
use tourdesk_shared::types::{CurrencyCode, Money};

use super::conversion::{Conversion, convert};
use super::rate_table::RateReader;
use crate::error::EngineResult;

/// Currency converter over a rate reader.
///
/// Stateless apart from the reader; safe to share across threads when the
/// reader is.
#[derive(Debug, Clone)]
pub struct CurrencyConverter<R> {
    rates: R,
}

impl<R: RateReader> CurrencyConverter<R> {
    /// Creates a converter reading rates from `rates`.
    pub const fn new(rates: R) -> Self {
        Self { rates }
    }

    /// The underlying rate reader.
    pub const fn rates(&self) -> &R {
        &self.rates
    }

    /// Converts `amount` into `to` as of `on_date`.
    ///
    /// # Errors
    ///
    /// See [`convert`].
    pub fn convert(
        &self,
        amount: Money,
        to: CurrencyCode,
        on_date: NaiveDate,
    ) -> EngineResult<Conversion> {
        convert(amount, to, on_date, &self.rates)
    }

    /// Converts several amounts into `to` as of `on_date` and sums them.
    ///
    /// Useful for totals over records kept in different currencies.
    ///
    /// # Errors
    ///
    /// Fails on the first amount that cannot be converted, or on overflow.
    pub fn convert_sum<'a, I>(
        &self,
        amounts: I,
        to: CurrencyCode,
        on_date: NaiveDate,
    ) -> EngineResult<Money>
    where
        I: IntoIterator<Item = &'a Money>,
    {
        amounts.into_iter().try_fold(Money::zero(to), |total, amount| {
            let converted = self.convert(*amount, to, on_date)?.converted;
            Ok(total.checked_add(converted)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::exchange::ExchangeRate;
    use crate::currency::rate_table::RateTable;
    use crate::error::EngineError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn to_pen(from: CurrencyCode, rate: Decimal) -> ExchangeRate {
        ExchangeRate::new(from, CurrencyCode::PEN, rate, date(2024, 1, 1), "SUNAT").unwrap()
    }

    fn converter() -> CurrencyConverter<RateTable> {
        let table = RateTable::from_rates([
            to_pen(CurrencyCode::USD, dec!(3.70)),
            to_pen(CurrencyCode::EUR, dec!(4.05)),
        ])
        .unwrap();
        CurrencyConverter::new(table)
    }

    #[test]
    fn test_convert_delegates_to_reader() {
        let result = converter()
            .convert(Money::new(dec!(10), CurrencyCode::EUR), CurrencyCode::PEN, date(2024, 2, 1))
            .unwrap();
        assert_eq!(result.converted, Money::new(dec!(40.50), CurrencyCode::PEN));
    }

    #[test]
    fn test_convert_sum_mixed_currencies() {
        let amounts = [
            Money::new(dec!(100), CurrencyCode::USD),
            Money::new(dec!(10), CurrencyCode::EUR),
            Money::new(dec!(5.50), CurrencyCode::PEN),
        ];
        let total = converter()
            .convert_sum(&amounts, CurrencyCode::PEN, date(2024, 2, 1))
            .unwrap();
        assert_eq!(total, Money::new(dec!(416.00), CurrencyCode::PEN));
    }

    #[test]
    fn test_convert_sum_fails_on_missing_rate() {
        let amounts = [Money::new(dec!(100), CurrencyCode::USD)];
        let result = converter().convert_sum(&amounts, CurrencyCode::EUR, date(2024, 2, 1));
        assert!(matches!(result, Err(EngineError::RateNotFound { .. })));
    }

    #[test]
    fn test_convert_sum_of_nothing_is_zero() {
        let total = converter()
            .convert_sum(&[], CurrencyCode::PEN, date(2024, 2, 1))
            .unwrap();
        assert!(total.is_zero());
    }
}
