//! Input validation for Minimail registration and message sending.
//!
//! The email grammar accepted here is structural only: a local part, an `@`,
//! and a dotted host ending in an alphabetic top-level label. Whether the
//! domain actually resolves is a separate concern (see the resolver module).

use thiserror::Error;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// Validate an email address.
///
/// Accepted shape: one or more of `A-Z a-z 0-9 . _ % + -` before a single
/// `@`, then a host of `A-Z a-z 0-9 . -` characters ending in a dot followed
/// by at least two ASCII letters.
///
/// # Examples
///
/// ```
/// use minimail::auth::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("user+tag@mail.example.co").is_ok());
/// assert!(validate_email("user@localhost").is_err()); // no dot
/// assert!(validate_email("user@example.c").is_err()); // short TLD
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, host)) = email.split_once('@') else {
        return Err(ValidationError::EmailInvalidFormat);
    };

    if local.is_empty() || !local.chars().all(is_local_char) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    // The top-level label is whatever follows the last dot; it must be
    // alphabetic and at least two characters. Everything before that dot is
    // the host name proper.
    let Some((name, tld)) = host.rsplit_once('.') else {
        return Err(ValidationError::EmailInvalidFormat);
    };

    if name.is_empty() || !name.chars().all(is_host_char) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Extract the domain part of an email address (everything after the `@`).
///
/// Returns `None` when there is no `@` at all. Call after `validate_email`
/// when the domain is needed for a reachability check.
pub fn domain_part(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, host)| host)
}
