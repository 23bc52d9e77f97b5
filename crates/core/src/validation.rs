//! Hand-written input checks that sit alongside the `validator` derives on
//! the DTOs: identifiers from request paths and version numbers.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Validate that an identifier is a non-blank string.
///
/// `field` names the identifier in the error message (e.g. `"Topic ID"`).
pub fn validate_id(id: &str, field: &str) -> Result<(), CoreError> {
    if id.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} must be a valid string"
        )));
    }
    Ok(())
}

/// Validate a requested version number (must be >= 1).
pub fn validate_version_number(version: i32) -> Result<(), CoreError> {
    if version < 1 {
        return Err(CoreError::Validation(format!(
            "Invalid version number {version}: must be at least 1"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
