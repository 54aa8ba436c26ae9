//! Database schema for Minimail.
//!
//! The schema is applied with `CREATE ... IF NOT EXISTS` every time the
//! database is opened, so re-opening an existing file is a no-op.

/// Schema statements, executed in order at open time.
pub const SCHEMA: &[&str] = &[
    // Users: one credential record per identity. The password column holds
    // either the current salt:digest form or a legacy plaintext value.
    r#"
CREATE TABLE IF NOT EXISTS users (
    email       TEXT PRIMARY KEY,
    password    TEXT NOT NULL
)
"#,
    // Messages between registered users
    r#"
CREATE TABLE IF NOT EXISTS messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    sender      TEXT NOT NULL,
    recipient   TEXT NOT NULL,
    subject     TEXT NOT NULL,
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
)
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages(recipient)
"#,
    r#"
CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender)
"#,
];
