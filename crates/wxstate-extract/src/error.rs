//! Failure taxonomy for the extraction pipeline.
//!
//! Every per-field failure is recoverable: it maps to an unavailable state
//! plus a report entry, and extraction of the remaining fields continues.
//! The only caller-fatal condition is a payload that is not a navigable
//! document at all.

use serde::Serialize;
use thiserror::Error;

/// Why a single field extraction produced no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The key path does not exist in the document.
    NotFound,
    /// A container was found where a scalar was expected, or vice versa.
    WrongShape,
    /// A string value could not be parsed as the declared numeric type.
    ParseError,
    /// The provider sent a recognized "no data" marker.
    SentinelValue,
    /// An unavailable value was passed through a converter untouched.
    ConversionSkipped,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NotFound => write!(f, "not found"),
            FailureReason::WrongShape => write!(f, "wrong shape"),
            FailureReason::ParseError => write!(f, "parse error"),
            FailureReason::SentinelValue => write!(f, "sentinel value"),
            FailureReason::ConversionSkipped => write!(f, "conversion skipped"),
        }
    }
}

/// One failed field extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub reason: FailureReason,
}

/// The per-location record of fields that failed extraction.
///
/// Ordered by FieldSpec declaration order. The caller uses this for
/// degraded-mode logging; it never carries a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub failures: Vec<FieldFailure>,
}

impl ExtractionReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// The reason recorded for `field`, if that field failed.
    #[must_use]
    pub fn reason_for(&self, field: &str) -> Option<FailureReason> {
        self.failures
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.reason)
    }

    pub(crate) fn record(&mut self, field: &str, reason: FailureReason) {
        self.failures.push(FieldFailure {
            field: field.to_string(),
            reason,
        });
    }
}

/// The single caller-fatal condition: the payload cannot be navigated at all.
///
/// A malformed document degrades field-by-field instead; only a root that is
/// neither a mapping nor a sequence is rejected outright.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("payload is not a navigable document (expected a JSON object or array)")]
    NotADocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_for_finds_recorded_failure() {
        let mut report = ExtractionReport::default();
        report.record("windGust", FailureReason::SentinelValue);
        assert_eq!(
            report.reason_for("windGust"),
            Some(FailureReason::SentinelValue)
        );
        assert_eq!(report.reason_for("temp"), None);
    }

    #[test]
    fn reasons_serialize_as_snake_case_tags() {
        let json = serde_json::to_value(FailureReason::WrongShape).unwrap();
        assert_eq!(json, serde_json::json!("wrong_shape"));
    }
}
