//! Multi-currency handling and exchange rates.
//!
//! Conversion always uses the most recent rate effective on or before the
//! requested date ("as of", never "nearest"). A missing rate is an error,
//! never a silent rate of 1.

pub mod conversion;
pub mod exchange;
pub mod rate_table;
pub mod service;

#[cfg(test)]
mod props;

pub use conversion::{Conversion, convert, convert_amount};
pub use exchange::ExchangeRate;
pub use rate_table::{RateReader, RateTable};
pub use service::CurrencyConverter;
