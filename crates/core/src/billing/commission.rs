//! Commission amounts.

use rust_decimal::Decimal;
use tourdesk_shared::types::Money;

use crate::error::{EngineError, EngineResult};

/// `base * percentage / 100`, rounded half-up to the minor unit.
///
/// `percentage` is expressed in percent, e.g. `10` for 10%.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the base is negative or the
/// percentage is outside `[0, 100]`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tourdesk_core::billing::compute_commission;
/// use tourdesk_shared::types::{CurrencyCode, Money};
///
/// let base = Money::new(dec!(2500.00), CurrencyCode::USD);
/// let commission = compute_commission(base, dec!(7.5)).unwrap();
/// assert_eq!(commission.amount, dec!(187.50));
/// ```
pub fn compute_commission(base: Money, percentage: Decimal) -> EngineResult<Money> {
    if base.is_negative() {
        return Err(EngineError::invalid(format!(
            "commission base must not be negative, got {base}"
        )));
    }
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid(format!(
            "commission percentage must be in [0, 100], got {percentage}"
        )));
    }

    let amount = base
        .amount
        .checked_mul(percentage)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(|| EngineError::invalid("amount too large for commission"))?;

    Ok(Money::new(amount, base.currency).round())
}
