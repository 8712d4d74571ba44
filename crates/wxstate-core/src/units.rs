//! Unit-system and quantity-family vocabulary.
//!
//! A [`UnitSystem`] is chosen once per location and applied to every field of
//! that extraction. The conversion rules themselves live in
//! `wxstate-extract`; these enums are the shared names.

use serde::{Deserialize, Serialize};

/// The configured combination of measurement units for one location.
///
/// | system   | temperature | speed | pressure | precipitation | distance |
/// |----------|-------------|-------|----------|---------------|----------|
/// | Standard | °F          | mph   | inHg     | in            | mi       |
/// | Metric   | °C          | kph   | mb       | mm            | km       |
/// | Mixed    | °C          | mph   | inHg     | in            | mi       |
/// | MixedSI  | °C          | m/s   | mb       | mm            | km       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    Standard,
    Metric,
    Mixed,
    MixedSi,
}

impl UnitSystem {
    /// Parses a configuration token. Accepts the long names
    /// (`standard`, `metric`, `mixed`, `mixed-si`) and the single-letter
    /// codes the original device dialogs used (`S`, `M`, `I`, `MS`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "s" => Some(UnitSystem::Standard),
            "metric" | "m" => Some(UnitSystem::Metric),
            "mixed" | "i" => Some(UnitSystem::Mixed),
            "mixed-si" | "ms" => Some(UnitSystem::MixedSi),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Standard => write!(f, "standard"),
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Mixed => write!(f, "mixed"),
            UnitSystem::MixedSi => write!(f, "mixed-si"),
        }
    }
}

/// The category of physical measurement a numeric field carries.
///
/// Governs which conversion rule and which display unit label apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityFamily {
    Temperature,
    Speed,
    Pressure,
    Precipitation,
    Distance,
}

impl std::fmt::Display for QuantityFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityFamily::Temperature => write!(f, "temperature"),
            QuantityFamily::Speed => write!(f, "speed"),
            QuantityFamily::Pressure => write!(f, "pressure"),
            QuantityFamily::Precipitation => write!(f, "precipitation"),
            QuantityFamily::Distance => write!(f, "distance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_names() {
        assert_eq!(UnitSystem::parse("standard"), Some(UnitSystem::Standard));
        assert_eq!(UnitSystem::parse("metric"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::parse("mixed"), Some(UnitSystem::Mixed));
        assert_eq!(UnitSystem::parse("mixed-si"), Some(UnitSystem::MixedSi));
    }

    #[test]
    fn parse_legacy_codes() {
        assert_eq!(UnitSystem::parse("S"), Some(UnitSystem::Standard));
        assert_eq!(UnitSystem::parse("M"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::parse("I"), Some(UnitSystem::Mixed));
        assert_eq!(UnitSystem::parse("MS"), Some(UnitSystem::MixedSi));
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(UnitSystem::parse("imperial-ish"), None);
        assert_eq!(UnitSystem::parse(""), None);
    }
}
