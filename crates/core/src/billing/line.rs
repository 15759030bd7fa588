//! Line totals for costs, sales and operational bookings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::Money;

use crate::error::{EngineError, EngineResult};
use crate::tax::{TaxCalculator, TaxSplit};

fn ensure_price(price: Money, what: &str) -> EngineResult<()> {
    if price.is_negative() {
        return Err(EngineError::invalid(format!(
            "{what} must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn ensure_count(count: u32, what: &str) -> EngineResult<()> {
    if count == 0 {
        return Err(EngineError::invalid(format!("{what} must be at least 1")));
    }
    Ok(())
}

fn multiply(price: Money, factor: Decimal) -> EngineResult<Money> {
    Ok(price.checked_mul(factor)?.round())
}

/// `unit_price * quantity`, rounded to the minor unit.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` for a negative price, a zero
/// quantity or overflow.
pub fn line_total(unit_price: Money, quantity: u32) -> EngineResult<Money> {
    ensure_price(unit_price, "unit price")?;
    ensure_count(quantity, "quantity")?;
    multiply(unit_price, Decimal::from(quantity))
}

/// `price_per_night * nights * rooms` for a hotel booking.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` for a negative price, zero nights or
/// rooms, or overflow.
pub fn hotel_stay_total(price_per_night: Money, nights: u32, rooms: u32) -> EngineResult<Money> {
    ensure_price(price_per_night, "price per night")?;
    ensure_count(nights, "nights")?;
    ensure_count(rooms, "rooms")?;
    let room_nights = Decimal::from(nights) * Decimal::from(rooms);
    multiply(price_per_night, room_nights)
}

/// `price_per_person * people` for a transport booking.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` for a negative price, zero people
/// or overflow.
pub fn per_person_total(price_per_person: Money, people: u32) -> EngineResult<Money> {
    ensure_price(price_per_person, "price per person")?;
    ensure_count(people, "people")?;
    multiply(price_per_person, Decimal::from(people))
}

/// `daily_rate * days` for a staff assignment, counting both ends.
///
/// # Errors
///
/// Returns `EngineError::InvalidArgument` for a negative rate, an end date
/// before the start date, or overflow.
pub fn staff_assignment_total(
    daily_rate: Money,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EngineResult<Money> {
    ensure_price(daily_rate, "daily rate")?;
    if end_date < start_date {
        return Err(EngineError::invalid(format!(
            "end date {end_date} is before start date {start_date}"
        )));
    }
    let days = (end_date - start_date).num_days() + 1;
    multiply(daily_rate, Decimal::from(days))
}

/// A cost or sale line as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free-text description.
    pub description: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Number of units.
    pub quantity: u32,
    /// Whether the unit price already includes IGV.
    #[serde(default)]
    pub includes_tax: bool,
}

impl LineItem {
    /// Creates a line with tax excluded from the unit price.
    pub fn new(description: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        Self {
            description: description.into(),
            unit_price,
            quantity,
            includes_tax: false,
        }
    }

    /// Marks the unit price as tax-inclusive.
    #[must_use]
    pub const fn tax_included(mut self) -> Self {
        self.includes_tax = true;
        self
    }
}

/// A line with its total and IGV split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    /// The line as entered.
    pub item: LineItem,
    /// `unit_price * quantity`.
    pub line_total: Money,
    /// IGV split of the line total.
    pub tax: TaxSplit,
}

impl PricedLine {
    /// Gross amount of the line.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.tax.total()
    }
}

/// Totals a line and splits out its IGV.
///
/// A tax-inclusive line keeps its total and extracts the tax; a tax-exclusive
/// line adds tax on top.
///
/// # Errors
///
/// See [`line_total`] and [`crate::tax::compute_tax`].
pub fn price_line(item: &LineItem, calculator: &TaxCalculator) -> EngineResult<PricedLine> {
    let line_total = line_total(item.unit_price, item.quantity)?;
    let tax = calculator.compute(line_total, item.includes_tax)?;
    Ok(PricedLine {
        item: item.clone(),
        line_total,
        tax,
    })
}
