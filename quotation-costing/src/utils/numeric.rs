//! Lenient numeric coercion.
//!
//! Costing inputs come from editable form fields and BOM payloads. Anything
//! that is not a usable number becomes zero; nothing in here returns an error
//! or panics.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Coerce an arbitrary JSON value to a decimal.
///
/// Numbers and numeric strings parse; `null`, booleans, arrays, objects and
/// unparseable strings become zero.
pub fn coerce_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => coerce_str(&n.to_string()),
        Value::String(s) => coerce_str(s),
        Value::Null => Decimal::ZERO,
        other => {
            debug!(input = %other, "Non-numeric input coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Parse a string as a decimal, accepting plain and scientific notation.
pub fn coerce_str(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or_else(|_| {
            debug!(input = %trimmed, "Unparseable numeric input coerced to zero");
            Decimal::ZERO
        })
}

/// Rates and quantities: negative values are invalid and become zero.
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        debug!(input = %value, "Negative amount coerced to zero");
        return Decimal::ZERO;
    }
    value
}

/// Adjustment percentages: anything outside `[0, 100]` becomes zero.
pub fn percentage(value: Decimal) -> Decimal {
    if value < Decimal::ZERO || value > HUNDRED {
        debug!(input = %value, "Out-of-range percentage coerced to zero");
        return Decimal::ZERO;
    }
    value
}

/// `base × pct / 100`, saturating.
///
/// The exact product is used when it fits; otherwise the base is scaled down
/// first, trading the last digits for range.
pub fn percent_of(base: Decimal, pct: Decimal) -> Decimal {
    match base.checked_mul(pct) {
        Some(product) => product / HUNDRED,
        None => (base / HUNDRED).saturating_mul(pct),
    }
}

/// `base × (1 + pct / 100)`, saturating.
pub fn with_markup(base: Decimal, pct: Decimal) -> Decimal {
    base.saturating_mul(Decimal::ONE + pct / HUNDRED)
}

/// Round to whole currency units. Only the presentation layer calls this.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Serde adapter: deserialize any JSON value into a decimal via
/// [`coerce_value`].
pub fn lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_value(&value))
}

/// Like [`lenient`], for optional patch fields. `null` counts as absent;
/// any other present value yields `Some`, with garbage coerced to zero.
pub fn lenient_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| coerce_value(&value)))
}
