//! Seasonal pricing for supplier services.
//!
//! A service has a base price and any number of price periods (low, mid,
//! high, peak season). The price on a given date is the price of the first
//! period covering that date, in catalog order, or the base price when no
//! period covers it.

pub mod catalog;
pub mod period;
pub mod resolver;

pub use catalog::{InMemoryCatalog, PriceCatalog, SupplierService};
pub use period::{PricePeriod, Season, find_overlaps, sort_by_priority};
pub use resolver::{PriceResolution, resolve_for_service, resolve_price};
