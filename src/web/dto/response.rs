//! Response DTOs for the Minimail API.

use serde::Serialize;

use crate::mail::Message;

/// Plain success/failure response.
#[derive(Debug, Serialize)]
pub struct ApiStatus {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure detail, omitted on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiStatus {
    /// A bare `{"success":true}` response.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A bare `{"success":false}` response.
    pub fn rejected() -> Self {
        Self {
            success: false,
            message: None,
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginSuccess {
    /// Always true.
    pub success: bool,
    /// Issued session token.
    pub token: String,
}

impl LoginSuccess {
    /// Wrap an issued token.
    pub fn new(token: String) -> Self {
        Self {
            success: true,
            token,
        }
    }
}

/// One inbox listing entry.
#[derive(Debug, Serialize)]
pub struct InboxEntry {
    /// Sender email address.
    pub from: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Delivery timestamp.
    pub time: String,
}

impl From<Message> for InboxEntry {
    fn from(message: Message) -> Self {
        Self {
            from: message.sender,
            subject: message.subject,
            body: message.body,
            time: message.created_at,
        }
    }
}

/// One sent listing entry.
#[derive(Debug, Serialize)]
pub struct SentEntry {
    /// Recipient email address.
    pub to: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Delivery timestamp.
    pub time: String,
}

impl From<Message> for SentEntry {
    fn from(message: Message) -> Self {
        Self {
            to: message.recipient,
            subject: message.subject,
            body: message.body,
            time: message.created_at,
        }
    }
}

/// Suggestion response. An empty body means no suggestion.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    /// Suggested message body.
    pub body: String,
}
