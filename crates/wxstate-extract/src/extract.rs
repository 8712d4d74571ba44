//! Per-location extraction: drives resolution, coercion, sentinel screening,
//! unit conversion, and derivation for a declared list of fields.

use std::collections::BTreeMap;

use serde_json::Value;
use wxstate_core::{DisplayConfig, NormalizedValue, QuantityFamily, StateValue, UnitSystem};

use crate::coerce::{self, TargetType};
use crate::derive::{self, IconRule, IconTable};
use crate::error::{ExtractError, ExtractionReport, FailureReason};
use crate::path::{self, KeyPath, Resolution};
use crate::sentinel;
use crate::units;

/// A secondary value computed from the normalized field instead of stored
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Expand an eight-point compass abbreviation to its full word.
    WindDirectionLong,
    /// Bucket the (converted) magnitude into an integer icon suffix.
    IconBucket,
    /// Humanize the provider's barometric trend marker.
    PressureTrend,
}

/// Declares one target device state: where it comes from in the document,
/// what type it must have, and how it is converted and displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub path: KeyPath,
    pub target: TargetType,
    pub family: Option<QuantityFamily>,
    pub derive: Option<Derivation>,
    pub percentage: bool,
    pub default: Option<NormalizedValue>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: &str, dotted_path: &str, target: TargetType) -> Self {
        Self {
            name: name.to_string(),
            path: KeyPath::parse(dotted_path),
            target,
            family: None,
            derive: None,
            percentage: false,
            default: None,
        }
    }

    /// Declares the quantity family, enabling unit conversion and the
    /// family's unit label.
    #[must_use]
    pub fn family(mut self, family: QuantityFamily) -> Self {
        self.family = Some(family);
        self
    }

    #[must_use]
    pub fn derive(mut self, derivation: Derivation) -> Self {
        self.derive = Some(derivation);
        self
    }

    /// Formats the display copy with the percentage precision and a `%`
    /// suffix.
    #[must_use]
    pub fn percentage(mut self) -> Self {
        self.percentage = true;
        self
    }

    /// Value stored when extraction fails. The failure is still reported;
    /// only the stored value changes. Used for quantities with a known floor
    /// (precipitation cannot be negative, so a corrupt reading stores 0).
    #[must_use]
    pub fn default_value(mut self, value: NormalizedValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// The result of one location extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub states: BTreeMap<String, StateValue>,
    pub report: ExtractionReport,
}

/// Stateless per-location extraction engine.
///
/// Holds only immutable configuration, so one instance can be shared across
/// concurrently processed locations; repeated extraction of the same
/// document yields an identical state mapping.
#[derive(Debug, Clone)]
pub struct LocationExtractor {
    units: UnitSystem,
    display: DisplayConfig,
    icons: IconTable,
}

impl LocationExtractor {
    #[must_use]
    pub fn new(units: UnitSystem, display: DisplayConfig) -> Self {
        Self {
            units,
            display,
            icons: IconTable::default(),
        }
    }

    /// Replaces the icon bucketing table.
    #[must_use]
    pub fn with_icon_table(mut self, icons: IconTable) -> Self {
        self.icons = icons;
        self
    }

    /// Extracts every declared field from `doc`.
    ///
    /// Fields fail independently: each failure records a report entry and an
    /// unavailable (or default) state, and the rest of the batch continues.
    ///
    /// # Errors
    ///
    /// [`ExtractError::NotADocument`] when `doc` is not a JSON object or
    /// array; this is the only failure that aborts the batch.
    pub fn extract(&self, doc: &Value, specs: &[FieldSpec]) -> Result<Extraction, ExtractError> {
        if !doc.is_object() && !doc.is_array() {
            return Err(ExtractError::NotADocument);
        }

        let mut states = BTreeMap::new();
        let mut report = ExtractionReport::default();

        for spec in specs {
            match self.normalize_field(doc, spec) {
                Ok(state) => {
                    states.insert(spec.name.clone(), state);
                }
                Err(reason) => {
                    tracing::debug!(field = %spec.name, %reason, "field extraction failed");
                    report.record(&spec.name, reason);
                    states.insert(spec.name.clone(), self.fallback_state(spec));
                }
            }
        }

        Ok(Extraction { states, report })
    }

    fn normalize_field(&self, doc: &Value, spec: &FieldSpec) -> Result<StateValue, FailureReason> {
        let raw = match path::resolve(doc, &spec.path) {
            Resolution::Found(v) => v,
            Resolution::NotFound => return Err(FailureReason::NotFound),
            Resolution::WrongShape => return Err(FailureReason::WrongShape),
        };

        // String sentinels are screened before coercion so "NA" where a
        // float is expected reads as a sentinel, not a parse error.
        if let Value::String(s) = raw {
            if sentinel::is_text_sentinel(s) {
                return Err(FailureReason::SentinelValue);
            }
        }

        let coerced = coerce::coerce(raw, spec.target)?;
        if sentinel::is_sentinel(&coerced) {
            return Err(FailureReason::SentinelValue);
        }

        let (value, label) = match (spec.family, coerced.as_f64()) {
            (Some(family), Some(_)) => match units::convert(family, self.units, &coerced) {
                Ok(converted) => (NormalizedValue::Float(converted.value), converted.label),
                Err(_) => (coerced, ""),
            },
            _ => (coerced, ""),
        };

        let value = self.apply_derivation(spec, value)?;
        Ok(self.render(spec, value, label))
    }

    fn apply_derivation(
        &self,
        spec: &FieldSpec,
        value: NormalizedValue,
    ) -> Result<NormalizedValue, FailureReason> {
        match spec.derive {
            None => Ok(value),
            Some(Derivation::WindDirectionLong) => Ok(match value {
                NormalizedValue::Text(s) => {
                    NormalizedValue::Text(derive::long_wind_direction(&s))
                }
                other => other,
            }),
            Some(Derivation::PressureTrend) => Ok(match value {
                NormalizedValue::Text(s) => {
                    NormalizedValue::Text(derive::pressure_trend_symbol(&s).to_string())
                }
                other => other,
            }),
            Some(Derivation::IconBucket) => {
                let rule = spec
                    .family
                    .map_or(IconRule::Truncate, |family| self.icons.rule(family));
                derive::icon_bucket(rule, &value)
                    .map(NormalizedValue::Int)
                    .ok_or(FailureReason::ConversionSkipped)
            }
        }
    }

    fn render(&self, spec: &FieldSpec, value: NormalizedValue, unit_label: &str) -> StateValue {
        // Icon buckets are raw image-name suffixes; no label, no decimals.
        if spec.derive == Some(Derivation::IconBucket) {
            let display = derive::format_display(&value, 0, "");
            return StateValue::new(value, display);
        }
        let (decimals, label) = if spec.percentage {
            (self.display.humidity_decimals, "%")
        } else {
            (self.decimals_for(spec.family), unit_label)
        };
        let display = derive::format_display(&value, decimals, label);
        StateValue::new(value, display)
    }

    fn fallback_state(&self, spec: &FieldSpec) -> StateValue {
        match &spec.default {
            Some(fallback) => {
                let label = spec
                    .family
                    .map_or("", |family| units::unit_label(family, self.units));
                self.render(spec, fallback.clone(), label)
            }
            None => StateValue::unavailable(),
        }
    }

    fn decimals_for(&self, family: Option<QuantityFamily>) -> u8 {
        match family {
            Some(QuantityFamily::Temperature) => self.display.temperature_decimals,
            Some(QuantityFamily::Speed) => self.display.wind_decimals,
            Some(QuantityFamily::Pressure | QuantityFamily::Precipitation) => 2,
            Some(QuantityFamily::Distance) | None => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn extractor(units: UnitSystem) -> LocationExtractor {
        LocationExtractor::new(units, DisplayConfig::default())
    }

    fn wind_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("windDirLong", "wind.dir", TargetType::Text)
                .derive(Derivation::WindDirectionLong),
            FieldSpec::new("windGust", "wind.gust", TargetType::Float)
                .family(QuantityFamily::Speed),
        ]
    }

    #[test]
    fn wind_example_from_a_sentinel_laden_document() {
        let doc = json!({"wind": {"degrees": 0, "dir": "N", "gust": -9999}});
        let result = extractor(UnitSystem::Standard)
            .extract(&doc, &wind_specs())
            .unwrap();

        let dir = &result.states["windDirLong"];
        assert_eq!(dir.value, NormalizedValue::Text("North".to_string()));
        assert_eq!(dir.display, "North");

        let gust = &result.states["windGust"];
        assert_eq!(gust.value, NormalizedValue::Unavailable);
        assert_eq!(gust.display, "--");
        assert_eq!(
            result.report.reason_for("windGust"),
            Some(FailureReason::SentinelValue)
        );
        assert_eq!(result.report.len(), 1);
    }

    #[test]
    fn missing_subtree_degrades_only_the_affected_field() {
        let doc = json!({"wind": {"dir": "NE", "gust": 21.3}});
        let mut specs = wind_specs();
        specs.push(
            FieldSpec::new("highNormal", "almanac.temp_high_normal_f", TargetType::Float)
                .family(QuantityFamily::Temperature),
        );

        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();

        assert_eq!(
            result.report.reason_for("highNormal"),
            Some(FailureReason::NotFound)
        );
        assert_eq!(result.states["highNormal"].value, NormalizedValue::Unavailable);
        assert_eq!(
            result.states["windDirLong"].value,
            NormalizedValue::Text("Northeast".to_string())
        );
        assert_eq!(result.states["windGust"].value, NormalizedValue::Float(21.3));
    }

    #[test]
    fn container_where_scalar_expected_is_wrong_shape() {
        let doc = json!({"wind": {"gust": [19.3]}});
        let specs = vec![
            FieldSpec::new("windGust", "wind.gust", TargetType::Float)
                .family(QuantityFamily::Speed),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(
            result.report.reason_for("windGust"),
            Some(FailureReason::WrongShape)
        );
        assert_eq!(result.states["windGust"].value, NormalizedValue::Unavailable);
    }

    #[test]
    fn every_sentinel_form_yields_unavailable_for_floats() {
        for sentinel in [json!(-99), json!(-999.0), json!(-9999), json!("NA"), json!("None"), json!("")] {
            let doc = json!({"temp": sentinel});
            let specs = vec![
                FieldSpec::new("temp", "temp", TargetType::Float)
                    .family(QuantityFamily::Temperature),
            ];
            let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
            assert_eq!(
                result.states["temp"].value,
                NormalizedValue::Unavailable,
                "sentinel {:?} must not survive as a reading",
                doc["temp"]
            );
            assert_eq!(result.states["temp"].display, "--");
            assert_eq!(
                result.report.reason_for("temp"),
                Some(FailureReason::SentinelValue)
            );
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = json!({
            "observations": [{
                "humidity": "82",
                "imperial": {"temp": 71.6, "windSpeed": 9.8}
            }]
        });
        let specs = vec![
            FieldSpec::new("temp", "observations.0.imperial.temp", TargetType::Float)
                .family(QuantityFamily::Temperature),
            FieldSpec::new("windSpeed", "observations.0.imperial.windSpeed", TargetType::Float)
                .family(QuantityFamily::Speed),
            FieldSpec::new("relativeHumidity", "observations.0.humidity", TargetType::Float)
                .percentage(),
        ];
        let ex = extractor(UnitSystem::Metric);
        let first = ex.extract(&doc, &specs).unwrap();
        let second = ex.extract(&doc, &specs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn metric_conversion_applies_to_stored_and_display_copies() {
        let doc = json!({"imperial": {"temp": 72.0}});
        let specs = vec![
            FieldSpec::new("temp", "imperial.temp", TargetType::Float)
                .family(QuantityFamily::Temperature),
        ];
        let result = extractor(UnitSystem::Metric).extract(&doc, &specs).unwrap();
        assert_eq!(result.states["temp"].value, NormalizedValue::Float(22.22));
        assert_eq!(result.states["temp"].display, "22.2°C");
    }

    #[test]
    fn numeric_string_passes_through_coercion_and_conversion() {
        let doc = json!({"imperial": {"pressure": "29.92"}});
        let specs = vec![
            FieldSpec::new("pressure", "imperial.pressure", TargetType::Float)
                .family(QuantityFamily::Pressure),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(result.states["pressure"].value, NormalizedValue::Float(29.92));
        assert_eq!(result.states["pressure"].display, "29.92inHg");
    }

    #[test]
    fn default_replaces_the_stored_value_but_failure_is_still_reported() {
        let doc = json!({"precip_today": "--"});
        let specs = vec![
            FieldSpec::new("precipToday", "precip_today", TargetType::Float)
                .family(QuantityFamily::Precipitation)
                .default_value(NormalizedValue::Float(0.0)),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(result.states["precipToday"].value, NormalizedValue::Float(0.0));
        assert_eq!(result.states["precipToday"].display, "0.00in");
        assert_eq!(
            result.report.reason_for("precipToday"),
            Some(FailureReason::ParseError)
        );
    }

    #[test]
    fn icon_buckets_follow_the_family_table() {
        let doc = json!({"imperial": {"pressure": 29.92, "windSpeed": 19.7, "temp": 72.5}});
        let specs = vec![
            FieldSpec::new("pressureIcon", "imperial.pressure", TargetType::Float)
                .family(QuantityFamily::Pressure)
                .derive(Derivation::IconBucket),
            FieldSpec::new("windSpeedIcon", "imperial.windSpeed", TargetType::Float)
                .family(QuantityFamily::Speed)
                .derive(Derivation::IconBucket),
            FieldSpec::new("tempIcon", "imperial.temp", TargetType::Float)
                .family(QuantityFamily::Temperature)
                .derive(Derivation::IconBucket),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(result.states["pressureIcon"].value, NormalizedValue::Int(2992));
        assert_eq!(result.states["pressureIcon"].display, "2992");
        assert_eq!(result.states["windSpeedIcon"].value, NormalizedValue::Int(19));
        assert_eq!(result.states["tempIcon"].value, NormalizedValue::Int(73));
    }

    #[test]
    fn pressure_trend_symbol_is_humanized() {
        let doc = json!({"pressure_trend": "+"});
        let specs = vec![
            FieldSpec::new("pressureSymbol", "pressure_trend", TargetType::Text)
                .derive(Derivation::PressureTrend),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(
            result.states["pressureSymbol"].value,
            NormalizedValue::Text("^".to_string())
        );
    }

    #[test]
    fn non_document_root_is_the_single_fatal_case() {
        let specs = wind_specs();
        let ex = extractor(UnitSystem::Standard);
        assert!(matches!(
            ex.extract(&json!("not a document"), &specs),
            Err(ExtractError::NotADocument)
        ));
        assert!(matches!(
            ex.extract(&json!(42), &specs),
            Err(ExtractError::NotADocument)
        ));
        assert!(matches!(
            ex.extract(&serde_json::Value::Null, &specs),
            Err(ExtractError::NotADocument)
        ));
    }

    #[test]
    fn humidity_uses_percentage_precision_and_suffix() {
        let doc = json!({"humidity": 80});
        let specs = vec![
            FieldSpec::new("relativeHumidity", "humidity", TargetType::Float).percentage(),
        ];
        let result = extractor(UnitSystem::Standard).extract(&doc, &specs).unwrap();
        assert_eq!(result.states["relativeHumidity"].display, "80.0%");
        assert_eq!(
            result.states["relativeHumidity"].value,
            NormalizedValue::Float(80.0)
        );
    }
}
