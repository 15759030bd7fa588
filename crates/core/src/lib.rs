//! Core business rules for Tourdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Catalog rows and exchange rates are read through small reader traits that the
//! surrounding application implements; nothing here performs I/O.
//!
//! # Modules
//!
//! - `tax` - IGV (VAT) inclusive/exclusive splits
//! - `pricing` - Seasonal price periods and price resolution by date
//! - `currency` - Exchange rates and date-scoped conversion
//! - `documents` - DNI/RUC normalization and RUC check-digit validation
//! - `billing` - Line totals, commissions, invoice amounts, payment summaries
//! - `formatting` - Reference codes, phone numbers, filenames

pub mod billing;
pub mod currency;
pub mod documents;
pub mod error;
pub mod formatting;
pub mod pricing;
pub mod tax;

pub use error::{EngineError, EngineResult};
