//! Unit conversion per quantity family and configured unit system.
//!
//! Raw document values are in Standard (imperial) units — the provider is
//! queried that way — and conversion derives the configured system from
//! them. All transforms are exact affine/linear maps; the converted storage
//! copy is rounded to a fixed internal precision so repeated conversion does
//! not accumulate error. Display rounding happens later and only on the
//! display copy.

use thiserror::Error;
use wxstate_core::{NormalizedValue, QuantityFamily, UnitSystem};

/// Internal storage precision, in decimal places.
///
/// Two places keeps a Standard→Metric→Standard temperature round-trip within
/// 0.06° — one rounding step of the affine transform.
pub const STORAGE_DECIMALS: u8 = 2;

/// A converted value together with its display unit label.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub value: f64,
    pub label: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// An unavailable value was handed to the converter; no arithmetic was
    /// performed.
    #[error("conversion skipped: value is unavailable")]
    ConversionSkipped,
    /// The value is not numeric (text or boolean state).
    #[error("conversion skipped: value is not numeric")]
    NotNumeric,
}

/// The display unit label for a family under a unit system.
#[must_use]
pub fn unit_label(family: QuantityFamily, system: UnitSystem) -> &'static str {
    use QuantityFamily as Q;
    use UnitSystem as U;
    match (family, system) {
        (Q::Temperature, U::Standard) => "°F",
        (Q::Temperature, _) => "°C",
        (Q::Speed, U::Standard | U::Mixed) => "mph",
        (Q::Speed, U::Metric) => "kph",
        (Q::Speed, U::MixedSi) => "m/s",
        (Q::Pressure, U::Standard | U::Mixed) => "inHg",
        (Q::Pressure, _) => "mb",
        (Q::Precipitation, U::Standard | U::Mixed) => "in",
        (Q::Precipitation, _) => "mm",
        (Q::Distance, U::Standard | U::Mixed) => "mi",
        (Q::Distance, _) => "km",
    }
}

/// Converts a normalized numeric value from Standard units into `system`.
///
/// # Errors
///
/// [`UnitError::ConversionSkipped`] for unavailable input (no arithmetic is
/// performed), [`UnitError::NotNumeric`] for text/bool input.
pub fn convert(
    family: QuantityFamily,
    system: UnitSystem,
    value: &NormalizedValue,
) -> Result<Converted, UnitError> {
    if value.is_unavailable() {
        return Err(UnitError::ConversionSkipped);
    }
    let raw = value.as_f64().ok_or(UnitError::NotNumeric)?;
    Ok(Converted {
        value: from_standard(family, system, raw),
        label: unit_label(family, system),
    })
}

/// Converts a raw Standard-unit magnitude into `system`, rounded to storage
/// precision.
#[must_use]
pub fn from_standard(family: QuantityFamily, system: UnitSystem, value: f64) -> f64 {
    use QuantityFamily as Q;
    use UnitSystem as U;
    let converted = match (family, system) {
        (Q::Temperature, U::Standard) => value,
        (Q::Temperature, _) => (value - 32.0) * 5.0 / 9.0,
        (Q::Speed, U::Standard | U::Mixed) => value,
        (Q::Speed, U::Metric) => value * 1.609_344,
        (Q::Speed, U::MixedSi) => value * 0.447_04,
        (Q::Pressure, U::Standard | U::Mixed) => value,
        (Q::Pressure, _) => value * 33.863_9,
        (Q::Precipitation, U::Standard | U::Mixed) => value,
        (Q::Precipitation, _) => value * 25.4,
        (Q::Distance, U::Standard | U::Mixed) => value,
        (Q::Distance, _) => value * 1.609_344,
    };
    round_to(converted, STORAGE_DECIMALS)
}

/// Converts a magnitude expressed in `system` back into Standard units,
/// rounded to storage precision. Inverse of [`from_standard`] within one
/// rounding step.
#[must_use]
pub fn to_standard(family: QuantityFamily, system: UnitSystem, value: f64) -> f64 {
    use QuantityFamily as Q;
    use UnitSystem as U;
    let converted = match (family, system) {
        (Q::Temperature, U::Standard) => value,
        (Q::Temperature, _) => value * 9.0 / 5.0 + 32.0,
        (Q::Speed, U::Standard | U::Mixed) => value,
        (Q::Speed, U::Metric) => value / 1.609_344,
        (Q::Speed, U::MixedSi) => value / 0.447_04,
        (Q::Pressure, U::Standard | U::Mixed) => value,
        (Q::Pressure, _) => value / 33.863_9,
        (Q::Precipitation, U::Standard | U::Mixed) => value,
        (Q::Precipitation, _) => value / 25.4,
        (Q::Distance, U::Standard | U::Mixed) => value,
        (Q::Distance, _) => value / 1.609_344,
    };
    round_to(converted, STORAGE_DECIMALS)
}

/// Half-up rounding to `decimals` places.
#[must_use]
pub(crate) fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_converts_to_celsius() {
        let c = from_standard(QuantityFamily::Temperature, UnitSystem::Metric, 72.0);
        assert!((c - 22.22).abs() < 1e-9, "72°F should be 22.22°C, got {c}");
    }

    #[test]
    fn temperature_standard_is_identity() {
        assert!(
            (from_standard(QuantityFamily::Temperature, UnitSystem::Standard, 72.35) - 72.35)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn temperature_round_trip_stays_within_tolerance() {
        for f in [-40.0, -0.4, 0.0, 32.0, 72.35, 98.6, 110.01] {
            let c = from_standard(QuantityFamily::Temperature, UnitSystem::Metric, f);
            let back = to_standard(QuantityFamily::Temperature, UnitSystem::Metric, c);
            assert!(
                (back - f).abs() <= 0.06,
                "round trip drifted: {f} -> {c} -> {back}"
            );
        }
    }

    #[test]
    fn speed_depends_on_system() {
        assert!(
            (from_standard(QuantityFamily::Speed, UnitSystem::Metric, 10.0) - 16.09).abs() < 1e-9
        );
        assert!(
            (from_standard(QuantityFamily::Speed, UnitSystem::MixedSi, 10.0) - 4.47).abs() < 1e-9
        );
        assert!(
            (from_standard(QuantityFamily::Speed, UnitSystem::Mixed, 10.0) - 10.0).abs() < 1e-9
        );
    }

    #[test]
    fn pressure_converts_to_millibars() {
        let mb = from_standard(QuantityFamily::Pressure, UnitSystem::Metric, 29.92);
        assert!((mb - 1013.21).abs() < 1e-9, "29.92 inHg ≈ 1013.21 mb, got {mb}");
    }

    #[test]
    fn precipitation_converts_to_millimeters() {
        let mm = from_standard(QuantityFamily::Precipitation, UnitSystem::MixedSi, 0.5);
        assert!((mm - 12.7).abs() < 1e-9);
    }

    #[test]
    fn mixed_keeps_imperial_precipitation_and_metric_temperature() {
        assert!(
            (from_standard(QuantityFamily::Precipitation, UnitSystem::Mixed, 0.5) - 0.5).abs()
                < 1e-9
        );
        let c = from_standard(QuantityFamily::Temperature, UnitSystem::Mixed, 32.0);
        assert!((c - 0.0).abs() < 1e-9);
    }

    #[test]
    fn labels_follow_the_unit_table() {
        assert_eq!(
            unit_label(QuantityFamily::Temperature, UnitSystem::Standard),
            "°F"
        );
        assert_eq!(unit_label(QuantityFamily::Speed, UnitSystem::MixedSi), "m/s");
        assert_eq!(unit_label(QuantityFamily::Pressure, UnitSystem::Metric), "mb");
        assert_eq!(
            unit_label(QuantityFamily::Distance, UnitSystem::Mixed),
            "mi"
        );
    }

    #[test]
    fn unavailable_short_circuits_without_arithmetic() {
        let result = convert(
            QuantityFamily::Temperature,
            UnitSystem::Metric,
            &NormalizedValue::Unavailable,
        );
        assert_eq!(result, Err(UnitError::ConversionSkipped));
    }

    #[test]
    fn text_input_is_not_numeric() {
        let result = convert(
            QuantityFamily::Speed,
            UnitSystem::Metric,
            &NormalizedValue::Text("brisk".to_string()),
        );
        assert_eq!(result, Err(UnitError::NotNumeric));
    }

    #[test]
    fn integer_input_converts_like_a_float() {
        let converted = convert(
            QuantityFamily::Temperature,
            UnitSystem::Metric,
            &NormalizedValue::Int(32),
        )
        .unwrap();
        assert!((converted.value - 0.0).abs() < 1e-9);
        assert_eq!(converted.label, "°C");
    }
}
