//! Registration, login, and token authentication for Minimail.
//!
//! The gateway is the single entry point the web layer talks to. It wires
//! email validation, the domain reachability check, credential storage, and
//! the session registry together.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::session::SessionRegistry;
use super::store::{CredentialStore, StoreError, VerifyOutcome};
use super::validation::{domain_part, validate_email, ValidationError};
use crate::db::SharedDatabase;
use crate::resolver::DomainResolver;

/// Registration errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Email failed format validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Email domain did not resolve.
    #[error("email domain not found")]
    DomainNotFound,

    /// Identity is already registered.
    #[error("user already exists")]
    AlreadyExists,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Outcome of a login attempt.
///
/// Rejection is a single undifferentiated outcome; the caller cannot tell
/// an unknown identity from a wrong password.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials verified; carries the issued session token.
    Granted(String),
    /// Credentials rejected.
    Rejected,
}

/// Facade over credential storage and session state.
pub struct AuthGateway {
    db: SharedDatabase,
    sessions: SessionRegistry,
    resolver: Arc<dyn DomainResolver>,
    verify_domain: bool,
}

impl AuthGateway {
    /// Create a gateway with domain verification on and no session expiry.
    pub fn new(db: SharedDatabase, resolver: Arc<dyn DomainResolver>) -> Self {
        Self::with_config(db, resolver, true, 0)
    }

    /// Create a gateway with explicit settings.
    ///
    /// `session_expiry_secs` of zero means sessions never expire.
    pub fn with_config(
        db: SharedDatabase,
        resolver: Arc<dyn DomainResolver>,
        verify_domain: bool,
        session_expiry_secs: u64,
    ) -> Self {
        Self {
            db,
            sessions: SessionRegistry::with_expiry_secs(session_expiry_secs),
            resolver,
            verify_domain,
        }
    }

    /// Register a new identity.
    ///
    /// Validates the email format, checks that the domain resolves (when
    /// enabled), then stores a salted hash of the password.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), RegistrationError> {
        validate_email(email)?;

        if self.verify_domain {
            if let Some(domain) = domain_part(email) {
                if !self.resolver.reachable(domain).await {
                    warn!(email = %email, "Registration rejected: domain not reachable");
                    return Err(RegistrationError::DomainNotFound);
                }
            }
        }

        let store = CredentialStore::new(self.db.pool());
        store.register(email, password).await.map_err(|e| match e {
            StoreError::AlreadyExists => RegistrationError::AlreadyExists,
            StoreError::Database(m) => RegistrationError::Database(m),
        })
    }

    /// Attempt a login and issue a session token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, StoreError> {
        let store = CredentialStore::new(self.db.pool());

        match store.verify(email, password).await? {
            VerifyOutcome::Match => {
                let token = self.sessions.issue(email).await;
                info!(email = %email, "Login successful");
                Ok(LoginOutcome::Granted(token))
            }
            VerifyOutcome::Mismatch | VerifyOutcome::NotFound => {
                warn!(email = %email, "Login rejected");
                Ok(LoginOutcome::Rejected)
            }
        }
    }

    /// Resolve a session token to the identity it was issued for.
    pub async fn authenticate(&self, token: &str) -> Option<String> {
        self.sessions.resolve(token).await
    }

    /// Revoke a session token. Returns whether a session was removed.
    pub async fn logout(&self, token: &str) -> bool {
        self.sessions.revoke(token).await
    }

    /// Drop expired sessions from the registry.
    pub async fn purge_expired_sessions(&self) -> usize {
        self.sessions.purge_expired().await
    }
}
