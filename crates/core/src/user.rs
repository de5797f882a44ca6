//! Field validation for the user resource.
//!
//! Used by the use-case layer before anything reaches the repository.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Entity name reported by the repository when a user row is missing.
pub const USER_ENTITY: &str = "User";

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// Validate a username: non-blank and at most [`MAX_USERNAME_LEN`] characters.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("username must not be empty".to_string()));
    }
    let len = username.chars().count();
    if len > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate that `email` is a syntactically valid address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validate the fields supplied when creating a user.
pub fn validate_new_user(email: &str, username: &str) -> Result<(), CoreError> {
    validate_username(username)?;
    validate_email(email)
}
