//! Extraction, validation, and normalization pipeline for raw weather
//! documents.
//!
//! Given a provider JSON document and a declared list of target fields, the
//! pipeline produces a mapping of state name to normalized value that is safe
//! to store, display, and compare against thresholds — or a well-defined
//! "unavailable" marker — without ever raising for a malformed document.
//!
//! Stages, applied per field: [`path`] resolution → [`coerce`] to the
//! declared type → [`sentinel`] screening → [`units`] conversion →
//! [`derive`]d values and display formatting. [`extract::LocationExtractor`]
//! orchestrates the stages; each field fails independently.

pub mod coerce;
pub mod derive;
pub mod error;
pub mod extract;
pub mod path;
pub mod sentinel;
pub mod units;

pub use coerce::TargetType;
pub use derive::{Comparison, IconRule, IconTable};
pub use error::{ExtractError, ExtractionReport, FailureReason, FieldFailure};
pub use extract::{Derivation, Extraction, FieldSpec, LocationExtractor};
pub use path::{KeyPath, Resolution};
