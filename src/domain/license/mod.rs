//! License key domain
//!
//! Key records, the lifetime grammar and input validation for issuing,
//! binding and revoking API keys.

mod duration;
mod entity;
mod validation;

pub use duration::{parse_duration, DurationError, DurationUnit, KeyDuration};
pub use entity::{IssuedKey, KeyEntry, KeyMap, KeyRecord, LoginOutcome};
pub use validation::{validate_hwid, validate_issue_request, LicenseValidationError};
