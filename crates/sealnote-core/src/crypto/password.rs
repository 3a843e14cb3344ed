//! Master password policy.
//!
//! The codec accepts any password. This policy is applied by the note
//! service when a password is first chosen (note creation or password
//! change), never when one is being checked.

use crate::error::{Result, SealnoteError};

/// Default minimum master password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a newly chosen master password meets the policy.
///
/// # Requirements
///
/// - Not empty or only whitespace
/// - At least `min_length` characters long
///
/// # Examples
///
/// ```
/// use sealnote_core::crypto::{validate_master_password, MIN_PASSWORD_LENGTH};
///
/// assert!(validate_master_password("correct-horse", MIN_PASSWORD_LENGTH).is_ok());
/// assert!(validate_master_password("short", MIN_PASSWORD_LENGTH).is_err());
/// ```
pub fn validate_master_password(password: &str, min_length: usize) -> Result<()> {
    if password.trim().is_empty() {
        return Err(SealnoteError::InvalidInput(
            "Master password cannot be empty".to_string(),
        ));
    }

    let length = password.chars().count();
    if length < min_length {
        return Err(SealnoteError::InvalidInput(format!(
            "Master password must be at least {} characters (got {})",
            min_length, length
        )));
    }

    Ok(())
}
