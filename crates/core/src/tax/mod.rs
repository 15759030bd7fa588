//! IGV (VAT) computation.
//!
//! Splits an amount into base, tax and total, either adding tax to a net
//! amount or extracting it from a gross one.

pub mod calculator;

#[cfg(test)]
mod props;

pub use calculator::{TaxCalculator, TaxSplit, compute_tax, validate_tax_rate};
