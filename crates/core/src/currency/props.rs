//! Property-based tests for currency conversion.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tourdesk_shared::types::{CurrencyCode, Money};

use super::conversion::convert;
use super::exchange::ExchangeRate;
use super::rate_table::RateTable;

/// Amounts with up to 4 decimal places (0.0000 to 1,000,000.0000).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Positive rates with 4 decimal places (0.0001 to 9,999.9999).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Day offsets from 2024-01-01.
fn day_offset() -> impl Strategy<Value = u64> {
    0u64..730
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// USD/PEN table with one rate per distinct offset.
fn table_from(entries: &[(u64, Decimal)]) -> RateTable {
    let mut table = RateTable::new();
    for (offset, rate) in entries {
        let rate = ExchangeRate::new(CurrencyCode::USD, CurrencyCode::PEN, *rate, day(*offset), "")
            .unwrap();
        table.upsert(rate).unwrap();
    }
    table
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Same-currency conversion returns the amount unchanged.
    #[test]
    fn prop_same_currency_is_identity(value in amount(), offset in day_offset()) {
        let money = Money::new(value, CurrencyCode::PEN);
        let result = convert(money, CurrencyCode::PEN, day(offset), &RateTable::new()).unwrap();
        prop_assert_eq!(result.converted, money);
        prop_assert_eq!(result.rate, Decimal::ONE);
    }

    /// The applied rate is never dated after the requested date, and it is the
    /// latest such rate.
    #[test]
    fn prop_applied_rate_is_as_of(
        entries in prop::collection::vec((day_offset(), positive_rate()), 1..20),
        value in amount(),
        on in day_offset(),
    ) {
        let table = table_from(&entries);
        let on_date = day(on);
        let money = Money::new(value, CurrencyCode::USD);

        let expected = entries
            .iter()
            .filter(|(offset, _)| *offset <= on)
            .map(|(offset, _)| *offset)
            .max();

        match (convert(money, CurrencyCode::PEN, on_date, &table), expected) {
            (Ok(result), Some(offset)) => {
                prop_assert!(result.rate_date <= on_date);
                prop_assert_eq!(result.rate_date, day(offset));
            }
            (Err(_), None) => {}
            (result, expected) => {
                prop_assert!(
                    false,
                    "unexpected outcome {:?} for expected offset {:?}",
                    result,
                    expected
                );
            }
        }
    }

    /// Converted amounts carry at most 2 decimal places and stay within half a
    /// cent of the exact product.
    #[test]
    fn prop_converted_amount_is_rounded(value in amount(), rate in positive_rate()) {
        let table = table_from(&[(0, rate)]);
        let money = Money::new(value, CurrencyCode::USD);
        let result = convert(money, CurrencyCode::PEN, base_date(), &table).unwrap();

        prop_assert!(result.converted.amount.scale() <= 2);
        let exact = value * rate;
        prop_assert!((result.converted.amount - exact).abs() <= Decimal::new(5, 3));
        prop_assert_eq!(result.converted.currency, CurrencyCode::PEN);
    }

    /// Converting the same input twice gives the same result.
    #[test]
    fn prop_conversion_is_deterministic(
        value in amount(),
        rate in positive_rate(),
        on in day_offset(),
    ) {
        let table = table_from(&[(0, rate)]);
        let money = Money::new(value, CurrencyCode::USD);
        let first = convert(money, CurrencyCode::PEN, day(on), &table);
        let second = convert(money, CurrencyCode::PEN, day(on), &table);
        prop_assert_eq!(first, second);
    }
}
