//! The normalized value vocabulary shared by every pipeline stage.
//!
//! A [`NormalizedValue`] is the only thing a field extraction can produce:
//! either a concrete scalar of the declared type, or [`Unavailable`] — the
//! canonical "no valid reading" marker. Unavailable is distinct from zero,
//! from the empty string, and from JSON null, and it never satisfies a
//! numeric threshold comparison.
//!
//! [`Unavailable`]: NormalizedValue::Unavailable

use serde::Serialize;

/// Fixed placeholder shown wherever an unavailable value reaches a display.
pub const UNAVAILABLE_DISPLAY: &str = "--";

/// A typed, validated device-state value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValue {
    Float(f64),
    Int(i64),
    Text(String),
    Bool(bool),
    /// No valid reading. Serializes as JSON null.
    Unavailable,
}

impl NormalizedValue {
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, NormalizedValue::Unavailable)
    }

    /// Numeric view of the value, or `None` for non-numeric and unavailable
    /// values. Threshold logic built on this can never mistake a sentinel
    /// repair constant for a real reading.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NormalizedValue::Float(v) => Some(*v),
            #[allow(clippy::cast_precision_loss)]
            NormalizedValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// `true` only when the value is numeric and strictly above `threshold`.
    /// Unavailable (and text/bool) values never exceed anything.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.as_f64().is_some_and(|v| v > threshold)
    }

    /// `true` only when the value is numeric and strictly below `threshold`.
    #[must_use]
    pub fn below(&self, threshold: f64) -> bool {
        self.as_f64().is_some_and(|v| v < threshold)
    }
}

impl std::fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizedValue::Float(v) => write!(f, "{v}"),
            NormalizedValue::Int(v) => write!(f, "{v}"),
            NormalizedValue::Text(v) => write!(f, "{v}"),
            NormalizedValue::Bool(v) => write!(f, "{v}"),
            NormalizedValue::Unavailable => write!(f, "{UNAVAILABLE_DISPLAY}"),
        }
    }
}

/// One entry of a state mapping: the stored value plus the UI copy.
///
/// The display string is rounded per the configured precision and carries the
/// unit label; the stored value keeps full internal precision so that
/// threshold comparisons and later conversions do not accumulate display
/// rounding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateValue {
    pub value: NormalizedValue,
    pub display: String,
}

impl StateValue {
    #[must_use]
    pub fn new(value: NormalizedValue, display: String) -> Self {
        Self { value, display }
    }

    /// An unavailable state with the fixed placeholder display.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            value: NormalizedValue::Unavailable,
            display: UNAVAILABLE_DISPLAY.to_string(),
        }
    }
}
