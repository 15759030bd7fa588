//! Identity document normalization and validation.
//!
//! Peruvian documents come in two flavours that matter here: the DNI
//! (8-digit national id) and the RUC (11-digit taxpayer number with a
//! check digit). Passports and other documents are normalized but never
//! padded or checked.

pub mod national_id;
pub mod ruc;

pub use national_id::{DNI_LENGTH, DocumentType, NationalId, normalize};
pub use ruc::{RUC_LENGTH, validate_tax_id};
