//! Coercion from a resolved raw value to a declared target type.
//!
//! The provider is inconsistent about scalar representation: numbers arrive
//! as strings, flags arrive as `0`/`1`, and occasionally a list or object
//! lands where a scalar was declared. Coercion accepts the known benign
//! variations and rejects the rest with a typed failure — it never panics.

use serde_json::Value;
use wxstate_core::NormalizedValue;

use crate::error::FailureReason;

/// The primitive type a field declares for its state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Float,
    Integer,
    Text,
    Bool,
}

/// Attempts to coerce `raw` into the declared target type.
///
/// Containers where a scalar is expected are [`FailureReason::WrongShape`];
/// strings that do not parse as the declared numeric type are
/// [`FailureReason::ParseError`]. JSON null is treated as a provider-sent
/// "no data" marker and reported as [`FailureReason::SentinelValue`].
///
/// # Errors
///
/// Returns the applicable [`FailureReason`]; the caller maps it to an
/// unavailable state plus a report entry.
pub fn coerce(raw: &Value, target: TargetType) -> Result<NormalizedValue, FailureReason> {
    if raw.is_array() || raw.is_object() {
        return Err(FailureReason::WrongShape);
    }
    if raw.is_null() {
        return Err(FailureReason::SentinelValue);
    }

    match target {
        TargetType::Float => coerce_float(raw).map(NormalizedValue::Float),
        TargetType::Integer => coerce_integer(raw).map(NormalizedValue::Int),
        TargetType::Text => Ok(NormalizedValue::Text(scalar_to_text(raw))),
        TargetType::Bool => coerce_bool(raw).map(NormalizedValue::Bool),
    }
}

fn coerce_float(raw: &Value) -> Result<f64, FailureReason> {
    match raw {
        Value::Number(n) => n.as_f64().ok_or(FailureReason::ParseError),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FailureReason::ParseError),
        _ => Err(FailureReason::ParseError),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_integer(raw: &Value) -> Result<i64, FailureReason> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                // Fractional values truncate toward zero, matching how the
                // host stores integer states.
                n.as_f64().map(|f| f.trunc() as i64).ok_or(FailureReason::ParseError)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(i);
            }
            trimmed
                .parse::<f64>()
                .map(|f| f.trunc() as i64)
                .map_err(|_| FailureReason::ParseError)
        }
        _ => Err(FailureReason::ParseError),
    }
}

fn coerce_bool(raw: &Value) -> Result<bool, FailureReason> {
    match raw {
        Value::Bool(b) => Ok(*b),
        // Known provider tokens only; anything else is a parse failure
        // rather than a guess.
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(FailureReason::ParseError),
        },
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(FailureReason::ParseError),
        },
        _ => Err(FailureReason::ParseError),
    }
}

fn scalar_to_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
