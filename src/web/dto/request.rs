//! Request DTOs for the Minimail API.
//!
//! Every field is optional so handlers can report missing fields instead
//! of tripping a deserialization rejection.

use serde::Deserialize;

/// Registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    /// Email address to register.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Login request.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: Option<String>,
    /// Password.
    pub password: Option<String>,
}

/// Send request. The sender is taken from the session, never the body.
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    /// Recipient email address.
    pub to: Option<String>,
    /// Message subject.
    pub subject: Option<String>,
    /// Message body.
    pub body: Option<String>,
}

/// Query parameters for the suggestion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    /// Subject to suggest a body for.
    pub subject: Option<String>,
}
