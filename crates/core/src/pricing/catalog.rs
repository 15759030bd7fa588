//! Catalog reader interface and an in-memory catalog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{Money, ServiceId, SupplierId};
use tracing::warn;

use super::period::{PricePeriod, find_overlaps, sort_by_priority};
use crate::error::{EngineError, EngineResult};

/// A service offered by a supplier (a room night, a transfer, an entrance fee...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierService {
    /// Unique identifier.
    pub id: ServiceId,
    /// Supplier offering the service.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Display name.
    pub name: String,
    /// Price when no seasonal period applies.
    pub base_price: Money,
    /// Pricing unit, e.g. "per night", "per person".
    #[serde(default)]
    pub unit: Option<String>,
    /// Whether the service can currently be booked.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SupplierService {
    /// Creates an active service.
    #[must_use]
    pub fn new(name: impl Into<String>, base_price: Money) -> Self {
        Self {
            id: ServiceId::new(),
            supplier_id: None,
            name: name.into(),
            base_price,
            unit: None,
            is_active: true,
        }
    }
}

/// Read access to the price periods of the catalog.
///
/// Implementations return the periods of one service in priority order:
/// start date ascending, so the earliest-starting period wins when periods
/// overlap. The set returned must not change during one resolution.
pub trait PriceCatalog {
    /// Price periods of the given service, in priority order.
    fn periods_for(&self, service_id: ServiceId) -> Vec<PricePeriod>;
}

/// In-memory catalog of services and their price periods.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    services: HashMap<ServiceId, SupplierService>,
    periods: HashMap<ServiceId, Vec<PricePeriod>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a service.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the base price is negative.
    pub fn add_service(&mut self, service: SupplierService) -> EngineResult<()> {
        if service.base_price.is_negative() {
            return Err(EngineError::invalid(format!(
                "base price of '{}' must not be negative",
                service.name
            )));
        }
        self.services.insert(service.id, service);
        Ok(())
    }

    /// Adds a price period to an existing service.
    ///
    /// Overlapping periods are accepted (the earliest-starting one wins at
    /// resolution time) but logged.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if the period is invalid or its
    /// service is not in the catalog.
    pub fn add_period(&mut self, period: PricePeriod) -> EngineResult<()> {
        period.validate()?;
        if !self.services.contains_key(&period.service_id) {
            return Err(EngineError::invalid(format!(
                "unknown service {} for price period",
                period.service_id
            )));
        }

        let periods = self.periods.entry(period.service_id).or_default();
        let new_id = period.id;
        periods.push(period);
        sort_by_priority(periods);

        for (first, second) in find_overlaps(periods) {
            if first == new_id || second == new_id {
                warn!(%first, %second, "Overlapping price periods in catalog");
            }
        }
        Ok(())
    }

    /// Looks up a service.
    #[must_use]
    pub fn service(&self, id: ServiceId) -> Option<&SupplierService> {
        self.services.get(&id)
    }

    /// Number of services in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns true if the catalog holds no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl PriceCatalog for InMemoryCatalog {
    fn periods_for(&self, service_id: ServiceId) -> Vec<PricePeriod> {
        self.periods.get(&service_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::period::Season;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tourdesk_shared::types::CurrencyCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, CurrencyCode::USD)
    }

    fn period(
        service: ServiceId,
        season: Season,
        (start, end): (NaiveDate, NaiveDate),
        price: rust_decimal::Decimal,
    ) -> PricePeriod {
        PricePeriod::new(service, season, start, end, usd(price)).unwrap()
    }

    #[test]
    fn test_periods_are_returned_by_start_date() {
        let service = SupplierService::new("Double room", usd(dec!(100)));
        let service_id = service.id;
        let mut catalog = InMemoryCatalog::new();
        catalog.add_service(service).unwrap();

        let autumn = (date(2024, 9, 1), date(2024, 11, 30));
        let summer = (date(2024, 7, 1), date(2024, 8, 31));
        let low = period(service_id, Season::Low, autumn, dec!(80));
        let high = period(service_id, Season::High, summer, dec!(140));
        catalog.add_period(low.clone()).unwrap();
        catalog.add_period(high.clone()).unwrap();

        assert_eq!(catalog.periods_for(service_id), vec![high, low]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unknown_service_has_no_periods() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.periods_for(ServiceId::new()).is_empty());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_add_period_requires_known_service() {
        let mut catalog = InMemoryCatalog::new();
        let january = (date(2024, 1, 1), date(2024, 1, 31));
        let orphan = period(ServiceId::new(), Season::Low, january, dec!(80));
        assert!(matches!(
            catalog.add_period(orphan),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_add_period_revalidates_deserialized_rows() {
        let service = SupplierService::new("Transfer", usd(dec!(30)));
        let mut catalog = InMemoryCatalog::new();
        let january = (date(2024, 1, 1), date(2024, 1, 31));
        let mut row = period(service.id, Season::Low, january, dec!(25));
        catalog.add_service(service).unwrap();

        row.end_date = date(2023, 12, 31);
        assert!(catalog.add_period(row).is_err());
    }

    #[test]
    fn test_add_service_rejects_negative_base_price() {
        let mut catalog = InMemoryCatalog::new();
        let service = SupplierService::new("Broken", usd(dec!(-5)));
        assert!(catalog.add_service(service).is_err());
    }
}
