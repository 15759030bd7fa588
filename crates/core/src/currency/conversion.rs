//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for conversions:
//! - Round the converted amount once, to the minor unit (2 decimal places)
//! - Use round-half-up (`MidpointAwayFromZero`)
//! - Report the rate and its effective date alongside the result

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tourdesk_shared::types::{CurrencyCode, Money, round_half_up};
use tracing::{debug, warn};

use super::rate_table::RateReader;
use crate::error::{EngineError, EngineResult};

/// Result of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Amount that was converted.
    pub original: Money,
    /// Converted amount, rounded to the minor unit.
    pub converted: Money,
    /// Rate applied (1 for same-currency conversions).
    pub rate: Decimal,
    /// Effective date of the applied rate (the requested date for identity conversions).
    pub rate_date: NaiveDate,
}

/// Multiplies an amount by a rate and rounds to the minor unit (round-half-up).
///
/// Returns `None` on overflow.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate).map(round_half_up)
}

/// Converts `amount` into `to` using the most recent rate effective on or before `on_date`.
///
/// Same-currency conversions short-circuit without a lookup: the amount is
/// returned unchanged with a rate of 1.
///
/// # Errors
///
/// Returns `EngineError::RateNotFound` when the reader has no applicable rate,
/// and `EngineError::InvalidArgument` if the multiplication overflows.
pub fn convert<R>(
    amount: Money,
    to: CurrencyCode,
    on_date: NaiveDate,
    rates: &R,
) -> EngineResult<Conversion>
where
    R: RateReader + ?Sized,
{
    if amount.currency == to {
        return Ok(Conversion {
            original: amount,
            converted: amount,
            rate: Decimal::ONE,
            rate_date: on_date,
        });
    }

    let not_found = || EngineError::RateNotFound {
        from: amount.currency,
        to,
        date: on_date,
    };

    let Some(rate) = rates.rate_on_or_before(amount.currency, to, on_date) else {
        warn!(from = %amount.currency, %to, date = %on_date, "No exchange rate available");
        return Err(not_found());
    };

    // A reader must never hand back a later-dated rate or another pair.
    if rate.effective_date > on_date
        || !rate.is_pair(amount.currency, to)
        || rate.rate <= Decimal::ZERO
    {
        warn!(
            from = %amount.currency,
            %to,
            date = %on_date,
            rate_date = %rate.effective_date,
            "Rate reader returned an inapplicable rate"
        );
        return Err(not_found());
    }

    let converted = convert_amount(amount.amount, rate.rate)
        .ok_or_else(|| EngineError::invalid("amount too large to convert"))?;

    debug!(
        from = %amount.currency,
        %to,
        rate = %rate.rate,
        rate_date = %rate.effective_date,
        "Converted amount"
    );

    Ok(Conversion {
        original: amount,
        converted: Money::new(converted, to),
        rate: rate.rate,
        rate_date: rate.effective_date,
    })
}
