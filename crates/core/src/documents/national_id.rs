//! Document types and value normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ruc::{RUC_LENGTH, validate_tax_id};
use crate::error::{EngineError, EngineResult};

/// Number of digits in a DNI.
pub const DNI_LENGTH: usize = 8;

/// Kind of identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// DNI, the national identity document.
    NationalId,
    /// RUC, the taxpayer registration number.
    TaxId,
    /// Passport.
    Passport,
    /// Anything else (foreigner card, etc.).
    Other,
}

impl DocumentType {
    /// Canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NationalId => "national-id",
            Self::TaxId => "tax-id",
            Self::Passport => "passport",
            Self::Other => "other",
        }
    }

    /// Length normalized values are zero-padded to, if any.
    #[must_use]
    pub const fn padded_length(self) -> Option<usize> {
        match self {
            Self::NationalId => Some(DNI_LENGTH),
            Self::TaxId => Some(RUC_LENGTH),
            Self::Passport | Self::Other => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dni" | "national-id" | "national_id" => Ok(Self::NationalId),
            "ruc" | "tax-id" | "tax_id" => Ok(Self::TaxId),
            "passport" | "pasaporte" => Ok(Self::Passport),
            "other" | "otro" => Ok(Self::Other),
            _ => Err(EngineError::InvalidDocument(format!(
                "unsupported document type '{s}'"
            ))),
        }
    }
}

/// Upper-cases `raw_value` (full Unicode case mapping) and keeps only `[0-9A-Z]`.
fn strip_to_alphanumeric(raw_value: &str) -> String {
    raw_value
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}

/// Normalizes a document value.
///
/// Upper-cases the input and drops everything outside `[0-9A-Z]`, then
/// zero-pads DNIs to 8 and RUCs to 11 characters. Values longer than the
/// padded length are left as they are.
///
/// ```
/// use tourdesk_core::documents::{DocumentType, normalize};
///
/// assert_eq!(normalize(DocumentType::NationalId, "1234-567"), "01234567");
/// assert_eq!(normalize(DocumentType::Passport, "ab 12.34"), "AB1234");
/// ```
#[must_use]
pub fn normalize(doc_type: DocumentType, raw_value: &str) -> String {
    let cleaned = strip_to_alphanumeric(raw_value);
    match doc_type.padded_length() {
        Some(width) => format!("{cleaned:0>width$}"),
        None => cleaned,
    }
}

/// A document as entered by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalId {
    /// Document type.
    pub doc_type: DocumentType,
    /// Value as entered.
    pub raw_value: String,
}

impl NationalId {
    /// Creates a document from its type and raw value.
    pub fn new(doc_type: DocumentType, raw_value: impl Into<String>) -> Self {
        Self {
            doc_type,
            raw_value: raw_value.into(),
        }
    }

    /// Normalized value; see [`normalize`].
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize(self.doc_type, &self.raw_value)
    }

    /// Normalizes the value and, for RUCs, checks the check digit.
    ///
    /// DNIs get no check-digit verification.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidDocument` if nothing is left of the value
    /// once stripped, or if a RUC fails validation.
    pub fn validate(&self) -> EngineResult<String> {
        if strip_to_alphanumeric(&self.raw_value).is_empty() {
            return Err(EngineError::InvalidDocument(format!(
                "{} value '{}' is empty after normalization",
                self.doc_type, self.raw_value
            )));
        }

        let normalized = self.normalized();
        if self.doc_type == DocumentType::TaxId && !validate_tax_id(&normalized) {
            return Err(EngineError::InvalidDocument(format!(
                "RUC '{normalized}' is not valid"
            )));
        }
        Ok(normalized)
    }
}
