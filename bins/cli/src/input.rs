//! JSON input files.
//!
//! Catalog file:
//!
//! ```json
//! { "services": [ { "name": "Double room", "base_price": { "amount": "95", "currency": "USD" },
//!                   "periods": [ { "season": "high", "start_date": "2024-06-01",
//!                                  "end_date": "2024-08-31",
//!                                  "price": { "amount": "130", "currency": "USD" } } ] } ] }
//! ```
//!
//! Rates file:
//!
//! ```json
//! { "rates": [ { "from_currency": "USD", "to_currency": "PEN", "rate": "3.70",
//!                "effective_date": "2024-01-01", "source": "SUNAT" } ] }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tourdesk_core::currency::{ExchangeRate, RateTable};
use tourdesk_core::pricing::{InMemoryCatalog, PricePeriod, Season, SupplierService};
use tourdesk_shared::types::{Money, ServiceId, SupplierId};
use tracing::debug;

/// Reads and parses a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", path.display()))
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    services: Vec<ServiceRecord>,
}

#[derive(Debug, Deserialize)]
struct ServiceRecord {
    #[serde(default)]
    id: Option<ServiceId>,
    #[serde(default)]
    supplier_id: Option<SupplierId>,
    name: String,
    base_price: Money,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    periods: Vec<PeriodRecord>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct PeriodRecord {
    season: Season,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price: Money,
    #[serde(default)]
    min_stay: Option<u32>,
}

/// A catalog loaded from file, with its services in file order.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: InMemoryCatalog,
    pub services: Vec<SupplierService>,
}

impl LoadedCatalog {
    /// Finds a service by id or by case-insensitive name.
    pub fn find(&self, key: &str) -> Option<&SupplierService> {
        let key = key.trim();
        self.services
            .iter()
            .find(|service| service.id.to_string() == key)
            .or_else(|| {
                self.services
                    .iter()
                    .find(|service| service.name.eq_ignore_ascii_case(key))
            })
    }
}

/// Loads a catalog file into an in-memory catalog.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let file: CatalogFile = read_json(path)?;
    let mut catalog = InMemoryCatalog::new();
    let mut services = Vec::with_capacity(file.services.len());

    for record in file.services {
        let service = SupplierService {
            id: record.id.unwrap_or_default(),
            supplier_id: record.supplier_id,
            name: record.name,
            base_price: record.base_price,
            unit: record.unit,
            is_active: record.is_active,
        };
        catalog.add_service(service.clone())?;

        for period in record.periods {
            let mut price_period = PricePeriod::new(
                service.id,
                period.season,
                period.start_date,
                period.end_date,
                period.price,
            )
            .with_context(|| format!("Invalid price period for '{}'", service.name))?;
            if let Some(nights) = period.min_stay {
                price_period = price_period.with_min_stay(nights)?;
            }
            catalog.add_period(price_period)?;
        }
        services.push(service);
    }

    debug!(path = %path.display(), services = services.len(), "Loaded catalog");
    Ok(LoadedCatalog { catalog, services })
}

#[derive(Debug, Deserialize)]
struct RatesFile {
    rates: Vec<ExchangeRate>,
}

/// Loads a rates file into a rate table.
pub fn load_rates(path: &Path) -> Result<RateTable> {
    let file: RatesFile = read_json(path)?;
    let count = file.rates.len();
    let table = RateTable::from_rates(file.rates)?;
    debug!(path = %path.display(), rates = count, "Loaded exchange rates");
    Ok(table)
}
