//! Invoice amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::Money;

use crate::error::{EngineError, EngineResult};
use crate::tax::TaxCalculator;

/// Largest accepted difference between `subtotal + tax` and `total` (0.01).
pub const INVOICE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Subtotal, tax and total of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmounts {
    /// Net amount.
    pub subtotal: Money,
    /// IGV.
    pub tax_amount: Money,
    /// Gross amount.
    pub total_amount: Money,
}

impl InvoiceAmounts {
    /// Derives tax and total from a net subtotal.
    ///
    /// # Errors
    ///
    /// See [`crate::tax::compute_tax`].
    pub fn from_subtotal(subtotal: Money, calculator: &TaxCalculator) -> EngineResult<Self> {
        let split = calculator.add_tax(subtotal)?;
        Ok(Self {
            subtotal: split.base(),
            tax_amount: split.tax(),
            total_amount: split.total(),
        })
    }

    /// Checks amounts entered by hand.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CurrencyMismatch` if the amounts are not all in
    /// the same currency, and `EngineError::InvalidArgument` if any amount is
    /// negative or `subtotal + tax` differs from `total` by more than 0.01.
    pub fn validate(&self) -> EngineResult<()> {
        self.subtotal.ensure_same_currency(&self.tax_amount)?;
        self.subtotal.ensure_same_currency(&self.total_amount)?;

        for (name, amount) in [
            ("subtotal", self.subtotal),
            ("tax amount", self.tax_amount),
            ("total amount", self.total_amount),
        ] {
            if amount.is_negative() {
                return Err(EngineError::invalid(format!(
                    "{name} must not be negative, got {amount}"
                )));
            }
        }

        let expected = self.subtotal.checked_add(self.tax_amount)?;
        let difference = (expected.amount - self.total_amount.amount).abs();
        if difference > INVOICE_TOLERANCE {
            return Err(EngineError::invalid(format!(
                "total {} does not match subtotal + tax = {}",
                self.total_amount, expected
            )));
        }
        Ok(())
    }
}
