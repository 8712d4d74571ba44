//! Observation freshness and epoch plausibility.
//!
//! The provider has been known to serve observations months old, and station
//! clocks drift into the future. A fetched document is applied only when its
//! observation epoch is plausible and not older than the epoch already
//! applied for that location.

use chrono::{DateTime, Utc};
use serde_json::Value;
use wxstate_extract::{KeyPath, Resolution};

/// Observations before this instant (2000-01-01 UTC) predate the provider's
/// network and cannot be real.
pub const ERA_START_EPOCH: i64 = 946_684_800;

/// Station clocks drift; observations up to this far in the future are
/// accepted as skew rather than corruption.
pub const MAX_FUTURE_SKEW_SECS: i64 = 900;

/// Verdict on a fetched document's observation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Newer than (or equal to) what was last applied; safe to use.
    Fresh,
    /// Older than the last applied observation; keep the existing states.
    Stale,
    /// Outside the plausible range entirely.
    Implausible,
}

/// `true` when `epoch` falls inside the plausible observation window.
#[must_use]
pub fn is_plausible_epoch(epoch: i64, now: DateTime<Utc>) -> bool {
    epoch >= ERA_START_EPOCH && epoch <= now.timestamp() + MAX_FUTURE_SKEW_SECS
}

/// Assesses a document's observation epoch against the last applied one.
///
/// `last_applied` is `None` for a location that has never been updated; any
/// plausible epoch is fresh then.
#[must_use]
pub fn assess(last_applied: Option<i64>, document_epoch: i64, now: DateTime<Utc>) -> Freshness {
    if !is_plausible_epoch(document_epoch, now) {
        return Freshness::Implausible;
    }
    match last_applied {
        Some(applied) if document_epoch < applied => Freshness::Stale,
        _ => Freshness::Fresh,
    }
}

/// Pulls the observation epoch out of a current-conditions document.
///
/// Tolerates the epoch arriving as a number or a numeric string; returns
/// `None` when it is absent or malformed.
#[must_use]
pub fn observation_epoch(doc: &Value) -> Option<i64> {
    let path = KeyPath::parse("observations.0.epoch");
    match wxstate_extract::path::resolve(doc, &path) {
        Resolution::Found(Value::Number(n)) => n.as_i64(),
        Resolution::Found(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Renders an observation epoch with the configured date and time formats,
/// for the `currentObservation24hr` state.
///
/// Returns `None` for epochs outside chrono's representable range.
#[must_use]
pub fn observation_time_display(epoch: i64, date_format: &str, time_format: &str) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some(dt.format(&format!("{date_format} {time_format}")).to_string())
}
