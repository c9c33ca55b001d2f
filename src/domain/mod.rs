//! Domain layer - Core business logic and entities

pub mod clock;
pub mod error;
pub mod license;
pub mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::DomainError;
pub use license::{
    parse_duration, validate_hwid, validate_issue_request, DurationError, DurationUnit,
    IssuedKey, KeyDuration, KeyEntry, KeyMap, KeyRecord, LicenseValidationError, LoginOutcome,
};
pub use snapshot::SnapshotStore;

impl From<LicenseValidationError> for DomainError {
    fn from(err: LicenseValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

impl From<DurationError> for DomainError {
    fn from(err: DurationError) -> Self {
        DomainError::validation(err.to_string())
    }
}
