//! Price resolution by date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::Money;
use tracing::debug;

use super::catalog::{PriceCatalog, SupplierService};
use super::period::PricePeriod;

/// Price applicable on a date and the period it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceResolution {
    /// Date the price was resolved for.
    pub date: NaiveDate,
    /// Applicable price.
    pub price: Money,
    /// Period that supplied the price; `None` means the base price applies.
    pub matched_period: Option<PricePeriod>,
}

impl PriceResolution {
    /// Season label of the matched period, or `"base"`.
    #[must_use]
    pub fn season_label(&self) -> &'static str {
        self.matched_period
            .as_ref()
            .map_or("base", |period| period.season.as_str())
    }
}

/// Resolves the price on `on_date`.
///
/// Scans `periods` in the order given and returns the first one covering the
/// date; callers supply periods in priority order (the catalog returns them by
/// start date ascending, so the earliest-starting period wins ties). Falls back
/// to `base_price` when no period covers the date.
#[must_use]
pub fn resolve_price(
    periods: &[PricePeriod],
    base_price: Money,
    on_date: NaiveDate,
) -> PriceResolution {
    let matched = periods.iter().find(|period| period.contains_date(on_date));

    PriceResolution {
        date: on_date,
        price: matched.map_or(base_price, |period| period.price),
        matched_period: matched.cloned(),
    }
}

/// Fetches the service's periods from the catalog and resolves the price on `on_date`.
pub fn resolve_for_service<C>(
    catalog: &C,
    service: &SupplierService,
    on_date: NaiveDate,
) -> PriceResolution
where
    C: PriceCatalog + ?Sized,
{
    let periods = catalog.periods_for(service.id);
    let resolution = resolve_price(&periods, service.base_price, on_date);

    debug!(
        service_id = %service.id,
        date = %on_date,
        season = resolution.season_label(),
        price = %resolution.price,
        "Resolved service price"
    );

    resolution
}
