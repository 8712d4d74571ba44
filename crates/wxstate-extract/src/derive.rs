//! Derived values computed from already-normalized fields.
//!
//! Everything here is a pure function that tolerates unavailable input and
//! propagates unavailability (or a neutral result) instead of raising.

use wxstate_core::{NormalizedValue, QuantityFamily, UNAVAILABLE_DISPLAY};

use crate::units::round_to;

/// Expands the eight cardinal/ordinal abbreviations to full words.
///
/// Other abbreviations (`NNE`, `WSW`, station oddities) pass through
/// unchanged so that triggers matching on them keep working.
#[must_use]
pub fn long_wind_direction(abbr: &str) -> String {
    match abbr.trim() {
        "N" => "North".to_string(),
        "NE" => "Northeast".to_string(),
        "E" => "East".to_string(),
        "SE" => "Southeast".to_string(),
        "S" => "South".to_string(),
        "SW" => "Southwest".to_string(),
        "W" => "West".to_string(),
        "NW" => "Northwest".to_string(),
        other => other.to_string(),
    }
}

/// How a family's magnitude becomes an integer icon-name suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconRule {
    /// Round to the nearest whole number.
    RoundWhole,
    /// Truncate toward zero.
    Truncate,
    /// Multiply by the factor, then truncate toward zero.
    ScaleTruncate(f64),
}

/// Per-family icon bucketing rules.
///
/// The exact boundaries are provider lore rather than specification, so they
/// live in one replaceable table instead of inline arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct IconTable {
    pub temperature: IconRule,
    pub speed: IconRule,
    pub pressure: IconRule,
    pub precipitation: IconRule,
    pub distance: IconRule,
}

impl Default for IconTable {
    fn default() -> Self {
        Self {
            temperature: IconRule::RoundWhole,
            speed: IconRule::Truncate,
            pressure: IconRule::ScaleTruncate(100.0),
            precipitation: IconRule::Truncate,
            distance: IconRule::Truncate,
        }
    }
}

impl IconTable {
    #[must_use]
    pub fn rule(&self, family: QuantityFamily) -> IconRule {
        match family {
            QuantityFamily::Temperature => self.temperature,
            QuantityFamily::Speed => self.speed,
            QuantityFamily::Pressure => self.pressure,
            QuantityFamily::Precipitation => self.precipitation,
            QuantityFamily::Distance => self.distance,
        }
    }
}

/// Buckets a numeric value into an integer icon suffix per `rule`.
///
/// Unavailable and non-numeric values yield `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn icon_bucket(rule: IconRule, value: &NormalizedValue) -> Option<i64> {
    let v = value.as_f64()?;
    let bucketed = match rule {
        IconRule::RoundWhole => v.round(),
        IconRule::Truncate => v.trunc(),
        IconRule::ScaleTruncate(factor) => (v * factor).trunc(),
    };
    Some(bucketed as i64)
}

/// Humanizes the provider's barometric trend marker.
///
/// `+` → `^` (rising), `0` → `-` (steady), `-` → `v` (falling); anything
/// else the provider invents becomes `?`.
#[must_use]
pub fn pressure_trend_symbol(raw: &str) -> &'static str {
    match raw.trim() {
        "+" => "^",
        "0" => "-",
        "-" => "v",
        _ => "?",
    }
}

/// Outcome of comparing yesterday's reading with today's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Warmer,
    Cooler,
    Same,
    /// At least one input had no valid reading.
    NotAvailable,
}

impl Comparison {
    /// The sentence used in daily summaries.
    #[must_use]
    pub fn statement(self) -> &'static str {
        match self {
            Comparison::Warmer => "Today is forecast to be warmer than yesterday.",
            Comparison::Cooler => "Today is forecast to be cooler than yesterday.",
            Comparison::Same => "Today is forecast to be about the same as yesterday.",
            Comparison::NotAvailable => "A comparison with yesterday is not available.",
        }
    }
}

/// Differences under this magnitude read as "about the same" — display
/// rounding would hide them anyway.
const SAME_TOLERANCE: f64 = 0.05;

/// Compares two same-family readings (yesterday's actual, today's forecast).
///
/// Any unavailable input produces [`Comparison::NotAvailable`] rather than a
/// false "same".
#[must_use]
pub fn compare_against_yesterday(
    yesterday: &NormalizedValue,
    forecast: &NormalizedValue,
) -> Comparison {
    let (Some(y), Some(f)) = (yesterday.as_f64(), forecast.as_f64()) else {
        return Comparison::NotAvailable;
    };
    let diff = f - y;
    if diff > SAME_TOLERANCE {
        Comparison::Warmer
    } else if diff < -SAME_TOLERANCE {
        Comparison::Cooler
    } else {
        Comparison::Same
    }
}

/// Formats the display copy of a value at the given precision, appending the
/// unit label to numeric values. Unavailable always renders as the fixed
/// placeholder.
#[must_use]
pub fn format_display(value: &NormalizedValue, decimals: u8, label: &str) -> String {
    match value {
        NormalizedValue::Float(v) => {
            let rounded = round_to(*v, decimals);
            format!("{rounded:.prec$}{label}", prec = usize::from(decimals))
        }
        NormalizedValue::Int(v) => format!("{v}{label}"),
        NormalizedValue::Text(s) => s.clone(),
        NormalizedValue::Bool(b) => b.to_string(),
        NormalizedValue::Unavailable => UNAVAILABLE_DISPLAY.to_string(),
    }
}
