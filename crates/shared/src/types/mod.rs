//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{CurrencyCode, MINOR_UNITS, Money, MoneyError, round_half_up};
