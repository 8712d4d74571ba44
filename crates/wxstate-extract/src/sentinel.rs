//! Recognition of the provider's "no data" sentinel values.
//!
//! Personal weather stations feed the provider corrupted readings, and the
//! provider passes them through as -99 / -999 / -9999 (in integer or float
//! form) or as the strings "NA", "None", and "". The set is fixed and shared
//! process-wide; detection runs after type coercion and before unit
//! conversion, so a sentinel never reaches converter arithmetic and never
//! masquerades as a real reading.

use wxstate_core::NormalizedValue;

/// Numeric placeholders the provider emits instead of real readings.
pub const NUMERIC_SENTINELS: [f64; 3] = [-99.0, -999.0, -9999.0];

/// String placeholders the provider emits instead of real readings. The
/// empty string is matched after trimming.
pub const TEXT_SENTINELS: [&str; 2] = ["NA", "None"];

/// `true` if `value` is exactly one of the numeric sentinels.
///
/// Exact comparison is intentional: the sentinels arrive as literal constants
/// (`-9999` or `-9999.0`), never as the result of arithmetic.
#[must_use]
pub fn is_numeric_sentinel(value: f64) -> bool {
    NUMERIC_SENTINELS.iter().any(|s| *s == value)
}

/// `true` if `text`, after trimming, is one of the string sentinels or empty.
#[must_use]
pub fn is_text_sentinel(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || TEXT_SENTINELS.contains(&trimmed)
}

/// `true` if a coerced value matches the sentinel set for its type.
#[must_use]
pub fn is_sentinel(value: &NormalizedValue) -> bool {
    match value {
        NormalizedValue::Float(v) => is_numeric_sentinel(*v),
        #[allow(clippy::cast_precision_loss)]
        NormalizedValue::Int(v) => is_numeric_sentinel(*v as f64),
        NormalizedValue::Text(s) => is_text_sentinel(s),
        NormalizedValue::Bool(_) | NormalizedValue::Unavailable => false,
    }
}
