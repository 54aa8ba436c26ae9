//! Message types for Minimail.

/// Timestamp format for stored and rendered message times.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored message.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    /// Message ID.
    pub id: i64,
    /// Sender email address.
    pub sender: String,
    /// Recipient email address.
    pub recipient: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// When the message was stored, formatted with [`TIME_FORMAT`].
    pub created_at: String,
}

/// New message for creation.
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Sender email address.
    pub sender: String,
    /// Recipient email address.
    pub recipient: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl NewMessage {
    /// Create a new message.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}
