//! Price period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{Money, PricePeriodId, ServiceId};

use crate::error::{EngineError, EngineResult};

/// Season a price period belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Low season.
    Low,
    /// Mid season.
    Mid,
    /// High season.
    High,
    /// Peak season (holidays, festivals).
    Peak,
}

impl Season {
    /// Lower-case label used in API payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
            Self::Peak => "peak",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Season {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "mid" => Ok(Self::Mid),
            "high" => Ok(Self::High),
            "peak" => Ok(Self::Peak),
            _ => Err(EngineError::invalid(format!("unknown season: {s}"))),
        }
    }
}

/// Special price of a service during a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePeriod {
    /// Unique identifier.
    #[serde(default)]
    pub id: PricePeriodId,
    /// Service this period prices.
    pub service_id: ServiceId,
    /// Season label.
    pub season: Season,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Price applicable during the period.
    pub price: Money,
    /// Minimum nights/days required for this price.
    #[serde(default)]
    pub min_stay: Option<u32>,
}

impl PricePeriod {
    /// Creates a validated price period.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if `start_date > end_date` or the
    /// price is negative.
    pub fn new(
        service_id: ServiceId,
        season: Season,
        start_date: NaiveDate,
        end_date: NaiveDate,
        price: Money,
    ) -> EngineResult<Self> {
        let period = Self {
            id: PricePeriodId::new(),
            service_id,
            season,
            start_date,
            end_date,
            price,
            min_stay: None,
        };
        period.validate()?;
        Ok(period)
    }

    /// Sets the minimum stay.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` if `nights` is zero.
    pub fn with_min_stay(mut self, nights: u32) -> EngineResult<Self> {
        self.min_stay = Some(nights);
        self.validate()?;
        Ok(self)
    }

    /// Checks the period's invariants.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidArgument` describing the first violated invariant.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::invalid(format!(
                "price period starts after it ends ({} > {})",
                self.start_date, self.end_date
            )));
        }
        if self.price.is_negative() {
            return Err(EngineError::invalid(format!(
                "price period price must not be negative, got {}",
                self.price
            )));
        }
        if self.min_stay == Some(0) {
            return Err(EngineError::invalid("minimum stay must be at least 1"));
        }
        Ok(())
    }

    /// Returns true if the given date falls within this period (both ends inclusive).
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if both periods price the same service and share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.service_id == other.service_id
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }
}

/// Orders periods by start date ascending; periods starting the same day keep
/// their relative order.
pub fn sort_by_priority(periods: &mut [PricePeriod]) {
    periods.sort_by_key(|period| period.start_date);
}

/// Lists every pair of overlapping periods (same service, shared day).
///
/// Overlaps are allowed by the resolver, which picks the first match; this is
/// for surfacing them to whoever maintains the catalog.
#[must_use]
pub fn find_overlaps(periods: &[PricePeriod]) -> Vec<(PricePeriodId, PricePeriodId)> {
    let mut overlaps = Vec::new();
    for (i, first) in periods.iter().enumerate() {
        for second in &periods[i + 1..] {
            if first.overlaps(second) {
                overlaps.push((first.id, second.id));
            }
        }
    }
    overlaps
}
