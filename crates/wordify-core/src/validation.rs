//! Local input validation.
//!
//! These checks run before any request is built. A failed check means the
//! request is never sent.

use thiserror::Error;

use crate::models::TermKind;

/// Minimum password length accepted by the backend at signup
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a {0} to look up")]
    EmptyTerm(TermKind),

    #[error("Select at least one item to generate sentences")]
    EmptySelection,

    #[error("Email and password required")]
    MissingCredentials,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    PasswordTooShort,

    #[error("Nothing to save - look up a definition first")]
    NothingToSave,
}

/// Trim a lookup term, rejecting blank input
pub fn normalize_term(text: &str, kind: TermKind) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTerm(kind));
    }
    Ok(trimmed.to_string())
}

/// Basic shape check: one `@`, something before it, a dot somewhere after it
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

pub fn check_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn check_signup(email: &str, password: &str) -> Result<(), ValidationError> {
    check_login(email, password)?;
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
