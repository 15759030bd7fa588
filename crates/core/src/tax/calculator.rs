//! Tax split calculation.
//!
//! CRITICAL: Rounding happens once, at the end, to the minor unit with
//! round-half-up. The split is derived so that `base + tax == total` holds
//! exactly after rounding:
//! - amount includes tax: round `total` and `base`, then `tax = total - base`
//! - amount excludes tax: round `base` and `tax`, then `total = base + tax`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::config::TaxConfig;
use tourdesk_shared::types::{CurrencyCode, Money, round_half_up};

use crate::error::{EngineError, EngineResult};

/// Result of a tax computation, all amounts rounded to the minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    /// Currency shared by all three amounts.
    pub currency: CurrencyCode,
    /// Net amount before tax.
    pub base_amount: Decimal,
    /// Tax portion.
    pub tax_amount: Decimal,
    /// Gross amount (`base_amount + tax_amount`).
    pub total_amount: Decimal,
}

impl TaxSplit {
    /// Net amount as money.
    #[must_use]
    pub const fn base(&self) -> Money {
        Money::new(self.base_amount, self.currency)
    }

    /// Tax amount as money.
    #[must_use]
    pub const fn tax(&self) -> Money {
        Money::new(self.tax_amount, self.currency)
    }

    /// Gross amount as money.
    #[must_use]
    pub const fn total(&self) -> Money {
        Money::new(self.total_amount, self.currency)
    }
}

/// Checks that a tax rate is a fraction in `[0, 1)`.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` for a negative rate or one of 1 or more.
pub fn validate_tax_rate(rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(EngineError::invalid(format!(
            "tax rate must be in [0, 1), got {rate}"
        )));
    }
    Ok(())
}

/// Computes the base/tax/total split of `amount` at `rate`.
///
/// If `amount_includes_tax` is true the amount is gross and the tax is
/// extracted (`base = amount / (1 + rate)`); otherwise the amount is net and
/// tax is added on top (`tax = amount * rate`).
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the amount is negative, the rate
/// is outside `[0, 1)`, or the result overflows.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tourdesk_core::tax::compute_tax;
/// use tourdesk_shared::types::{CurrencyCode, Money};
///
/// let split = compute_tax(Money::new(dec!(118.00), CurrencyCode::PEN), dec!(0.18), true).unwrap();
/// assert_eq!(split.base_amount, dec!(100.00));
/// assert_eq!(split.tax_amount, dec!(18.00));
/// assert_eq!(split.total_amount, dec!(118.00));
/// ```
pub fn compute_tax(
    amount: Money,
    rate: Decimal,
    amount_includes_tax: bool,
) -> EngineResult<TaxSplit> {
    if amount.is_negative() {
        return Err(EngineError::invalid(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    validate_tax_rate(rate)?;

    let overflow = || EngineError::invalid("amount too large for tax computation");

    let (base_amount, tax_amount, total_amount) = if amount_includes_tax {
        let divisor = Decimal::ONE + rate;
        let base = amount.amount.checked_div(divisor).ok_or_else(overflow)?;
        let total = round_half_up(amount.amount);
        let base = round_half_up(base);
        (base, total - base, total)
    } else {
        let tax = amount.amount.checked_mul(rate).ok_or_else(overflow)?;
        let base = round_half_up(amount.amount);
        let tax = round_half_up(tax);
        let total = base.checked_add(tax).ok_or_else(overflow)?;
        (base, tax, total)
    };

    Ok(TaxSplit {
        currency: amount.currency,
        base_amount,
        tax_amount,
        total_amount,
    })
}

/// Tax calculator bound to a configured rate.
///
/// The rate is supplied by the application (see `TaxConfig`), never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCalculator {
    rate: Decimal,
}

impl TaxCalculator {
    /// Creates a calculator for the given rate.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the rate is outside `[0, 1)`.
    pub fn new(rate: Decimal) -> EngineResult<Self> {
        validate_tax_rate(rate)?;
        Ok(Self { rate })
    }

    /// Creates a calculator from the application's tax configuration.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the configured rate is outside `[0, 1)`.
    pub fn from_config(config: &TaxConfig) -> EngineResult<Self> {
        Self::new(config.igv_rate)
    }

    /// The configured rate.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Computes a split at the configured rate.
    ///
    /// # Errors
    ///
    /// See [`compute_tax`].
    pub fn compute(&self, amount: Money, amount_includes_tax: bool) -> EngineResult<TaxSplit> {
        compute_tax(amount, self.rate, amount_includes_tax)
    }

    /// Adds tax on top of a net amount.
    ///
    /// # Errors
    ///
    /// See [`compute_tax`].
    pub fn add_tax(&self, net: Money) -> EngineResult<TaxSplit> {
        self.compute(net, false)
    }

    /// Extracts the tax contained in a gross amount.
    ///
    /// # Errors
    ///
    /// See [`compute_tax`].
    pub fn extract_tax(&self, gross: Money) -> EngineResult<TaxSplit> {
        self.compute(gross, true)
    }
}
