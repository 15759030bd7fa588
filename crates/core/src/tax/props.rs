//! Property-based tests for tax splits.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tourdesk_shared::types::{CurrencyCode, Money};

use super::calculator::compute_tax;

/// Amounts in cents from 0.00 to 10,000,000.00.
fn amount_in_cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts with up to 6 decimal places, to exercise end-of-computation rounding.
fn fine_grained_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|units| Decimal::new(units, 6))
}

/// Rates in [0, 0.9999].
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

fn pen(amount: Decimal) -> Money {
    Money::new(amount, CurrencyCode::PEN)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// base + tax == total exactly, for both directions.
    #[test]
    fn prop_split_sums_exactly(
        amount in fine_grained_amount(),
        rate in tax_rate(),
        includes in any::<bool>(),
    ) {
        let split = compute_tax(pen(amount), rate, includes).unwrap();
        prop_assert_eq!(split.base_amount + split.tax_amount, split.total_amount);
    }

    /// All three amounts are non-negative and carry at most 2 decimal places.
    #[test]
    fn prop_split_non_negative_and_rounded(
        amount in fine_grained_amount(),
        rate in tax_rate(),
        includes in any::<bool>(),
    ) {
        let split = compute_tax(pen(amount), rate, includes).unwrap();
        for value in [split.base_amount, split.tax_amount, split.total_amount] {
            prop_assert!(value >= Decimal::ZERO, "{} should be non-negative", value);
            prop_assert_eq!(value, value.round_dp(2), "{} should have at most 2 dp", value);
        }
    }

    /// Adding tax and then extracting it again recovers the original net amount
    /// within one minor unit.
    #[test]
    fn prop_add_then_extract_round_trips(
        amount in amount_in_cents(),
        rate in tax_rate(),
    ) {
        let gross = compute_tax(pen(amount), rate, false).unwrap();
        let back = compute_tax(gross.total(), rate, true).unwrap();
        let diff = (back.base_amount - amount).abs();
        prop_assert!(
            diff <= Decimal::new(1, 2),
            "round trip drifted: {} -> {} -> {}",
            amount, gross.total_amount, back.base_amount
        );
        prop_assert_eq!(back.total_amount, gross.total_amount);
    }

    /// Extracting tax never yields a base larger than the gross amount.
    #[test]
    fn prop_extracted_base_not_above_total(
        amount in amount_in_cents(),
        rate in tax_rate(),
    ) {
        let split = compute_tax(pen(amount), rate, true).unwrap();
        prop_assert!(split.base_amount <= split.total_amount);
    }
}
