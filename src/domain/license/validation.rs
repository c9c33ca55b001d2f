//! Request field validation for license operations

use thiserror::Error;

/// Errors raised before any key state is touched
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LicenseValidationError {
    #[error("Username and time are required")]
    MissingIssueFields,

    #[error("HWID is required")]
    MissingHwid,
}

/// Validate the inputs of an issue request
pub fn validate_issue_request(username: &str, time: &str) -> Result<(), LicenseValidationError> {
    if username.is_empty() || time.is_empty() {
        return Err(LicenseValidationError::MissingIssueFields);
    }

    Ok(())
}

/// Validate the device identifier supplied at login
pub fn validate_hwid(hwid: &str) -> Result<(), LicenseValidationError> {
    if hwid.is_empty() {
        return Err(LicenseValidationError::MissingHwid);
    }

    Ok(())
}
