//! Credential persistence for Minimail.
//!
//! The store owns every read and write of the users table. Verification
//! understands both credential formats and upgrades legacy plaintext records
//! in place the first time they verify successfully.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use super::credential::{hash_password, Credential};

/// Storage-level errors for credential operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The identity is already registered.
    #[error("user already exists")]
    AlreadyExists,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Outcome of a verification attempt.
///
/// The distinction between `Mismatch` and `NotFound` is internal; the
/// gateway collapses both before anything reaches a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Password matches the stored credential.
    Match,
    /// Identity exists but the password is wrong.
    Mismatch,
    /// No credential stored for this identity.
    NotFound,
}

/// Repository for credential records.
pub struct CredentialStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CredentialStore<'a> {
    /// Create a new CredentialStore with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a freshly hashed credential for a new identity.
    ///
    /// A uniqueness violation maps to `AlreadyExists`; any other storage
    /// failure surfaces as a database error.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), StoreError> {
        let stored = hash_password(password);

        sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
            .bind(email)
            .bind(&stored)
            .execute(self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists,
                other => StoreError::Database(other.to_string()),
            })?;

        info!(email = %email, "New user registered");
        Ok(())
    }

    /// Verify a password against the stored credential for an identity.
    ///
    /// A legacy plaintext record that matches is rewritten to the hashed
    /// format before returning. Failure of that rewrite is logged and does
    /// not affect the verification result.
    pub async fn verify(&self, email: &str, password: &str) -> Result<VerifyOutcome, StoreError> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        let Some(stored) = stored else {
            return Ok(VerifyOutcome::NotFound);
        };

        let credential = Credential::parse(&stored);
        if !credential.matches(password) {
            return Ok(VerifyOutcome::Mismatch);
        }

        if credential.is_legacy() {
            self.upgrade_legacy(email, password).await;
        }

        Ok(VerifyOutcome::Match)
    }

    /// Rewrite a legacy record in the hashed format.
    ///
    /// Errors are swallowed so the login that triggered the upgrade still
    /// succeeds; the record stays legacy and is retried on the next login.
    async fn upgrade_legacy(&self, email: &str, password: &str) {
        let stored = hash_password(password);

        match sqlx::query("UPDATE users SET password = ? WHERE email = ?")
            .bind(&stored)
            .bind(email)
            .execute(self.pool)
            .await
        {
            Ok(_) => info!(email = %email, "Upgraded legacy credential to hashed format"),
            Err(e) => warn!(email = %email, error = %e, "Failed to upgrade legacy credential"),
        }
    }

    /// Fetch the raw stored credential string, if any.
    pub async fn stored_credential(&self, email: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
