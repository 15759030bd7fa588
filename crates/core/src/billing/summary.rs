//! Paid and pending summaries of financial records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{CurrencyCode, Money};

use crate::error::{EngineError, EngineResult};

/// Checks the payment fields of a record.
///
/// A paid record needs a payment date; when `require_method` is set (sales
/// and invoices) it also needs a non-blank payment method.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` naming the missing field.
pub fn validate_payment(
    paid: bool,
    payment_date: Option<NaiveDate>,
    payment_method: Option<&str>,
    require_method: bool,
) -> EngineResult<()> {
    if !paid {
        return Ok(());
    }
    if payment_date.is_none() {
        return Err(EngineError::invalid("payment date is required for paid records"));
    }
    if require_method && payment_method.is_none_or(|method| method.trim().is_empty()) {
        return Err(EngineError::invalid("payment method is required for paid records"));
    }
    Ok(())
}

/// Invoice statuses that have been submitted to SUNAT.
pub const SUBMITTED_INVOICE_STATUSES: [&str; 2] = ["sent", "accepted"];

/// Payment methods that go through a bank.
pub const BANK_PAYMENT_METHODS: [&str; 2] = ["transfer", "deposit"];

/// A submitted invoice (`sent` or `accepted`) must carry the SUNAT response.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the response is missing or empty.
pub fn validate_invoice_submission(
    status: &str,
    sunat_response: Option<&str>,
) -> EngineResult<()> {
    if SUBMITTED_INVOICE_STATUSES.contains(&status) && sunat_response.is_none_or(str::is_empty) {
        return Err(EngineError::invalid("SUNAT response is required for sent/accepted invoices"));
    }
    Ok(())
}

/// A deposit made by transfer or bank deposit must name the bank.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` if the bank name is missing or empty.
pub fn validate_deposit(payment_method: &str, bank_name: Option<&str>) -> EngineResult<()> {
    if BANK_PAYMENT_METHODS.contains(&payment_method) && bank_name.is_none_or(str::is_empty) {
        return Err(EngineError::invalid("bank name is required for transfers and deposits"));
    }
    Ok(())
}

/// The payment-relevant part of a cost, sale or commission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Record amount.
    pub amount: Money,
    /// Whether the record has been paid.
    #[serde(default)]
    pub paid: bool,
    /// Date of payment.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Payment method (cash, transfer, card...).
    #[serde(default)]
    pub payment_method: Option<String>,
}

impl PaymentRecord {
    /// Creates an unpaid record.
    #[must_use]
    pub const fn unpaid(amount: Money) -> Self {
        Self {
            amount,
            paid: false,
            payment_date: None,
            payment_method: None,
        }
    }

    /// Creates a record paid on `date`.
    #[must_use]
    pub const fn paid_on(amount: Money, date: NaiveDate) -> Self {
        Self {
            amount,
            paid: true,
            payment_date: Some(date),
            payment_method: None,
        }
    }

    /// See [`validate_payment`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` naming the missing field.
    pub fn validate(&self, require_method: bool) -> EngineResult<()> {
        validate_payment(
            self.paid,
            self.payment_date,
            self.payment_method.as_deref(),
            require_method,
        )
    }
}

/// Total, paid and pending sums over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Currency of every summed record.
    pub currency: CurrencyCode,
    /// Number of records.
    pub count: usize,
    /// Sum of all amounts.
    pub total: Money,
    /// Sum of paid amounts.
    pub paid: Money,
    /// Sum of unpaid amounts.
    pub pending: Money,
}

impl PaymentSummary {
    /// Sums `records`.
    ///
    /// Returns `Ok(None)` when there are no records.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CurrencyMismatch` if the records are not all in
    /// the same currency (convert them first), and
    /// `EngineError::InvalidArgument` on overflow.
    pub fn from_items<'a, I>(records: I) -> EngineResult<Option<Self>>
    where
        I: IntoIterator<Item = &'a PaymentRecord>,
    {
        let mut summary: Option<Self> = None;

        for record in records {
            let current = summary.get_or_insert_with(|| Self::empty(record.amount.currency));
            current.total = current.total.checked_add(record.amount)?;
            if record.paid {
                current.paid = current.paid.checked_add(record.amount)?;
            } else {
                current.pending = current.pending.checked_add(record.amount)?;
            }
            current.count += 1;
        }

        Ok(summary)
    }

    const fn empty(currency: CurrencyCode) -> Self {
        Self {
            currency,
            count: 0,
            total: Money::zero(currency),
            paid: Money::zero(currency),
            pending: Money::zero(currency),
        }
    }
}
