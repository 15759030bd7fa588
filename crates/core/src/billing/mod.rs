//! Billing arithmetic for costs, sales, commissions and invoices.
//!
//! These are the derived amounts the back office stores alongside each
//! financial record: line totals from unit prices, IGV splits, commission
//! amounts, invoice totals and paid/pending summaries.

pub mod commission;
pub mod invoice;
pub mod line;
pub mod summary;

pub use commission::compute_commission;
pub use invoice::{INVOICE_TOLERANCE, InvoiceAmounts};
pub use line::{
    LineItem, PricedLine, hotel_stay_total, line_total, per_person_total, price_line,
    staff_assignment_total,
};
pub use summary::{
    BANK_PAYMENT_METHODS, PaymentRecord, PaymentSummary, SUBMITTED_INVOICE_STATUSES,
    validate_deposit, validate_invoice_submission, validate_payment,
};
