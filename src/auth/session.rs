//! Session token management for Minimail.
//!
//! Tokens are opaque UUID v4 strings mapping to the authenticated identity.
//! Sessions live in memory only and disappear on restart. Expiry is
//! optional; the default configuration never expires a session.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// An active session for a logged-in identity.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session token (UUID v4).
    pub token: String,
    /// Email address the session was issued for.
    pub identity: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires, if expiry is enabled.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    fn new(identity: &str, ttl: Option<Duration>) -> Self {
        let now = Utc::now();
        let expires_at = ttl.map(|d| now + chrono::Duration::from_std(d).unwrap_or_default());

        Self {
            token: Uuid::new_v4().to_string(),
            identity: identity.to_string(),
            created_at: now,
            expires_at,
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Utc::now() >= at,
            None => false,
        }
    }
}

/// In-memory registry of active sessions, keyed by token.
///
/// All methods take `&self`; shared access from concurrent handlers goes
/// through the interior lock.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Option<Duration>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Create a registry whose sessions never expire.
    pub fn new() -> Self {
        Self::with_ttl(None)
    }

    /// Create a registry with the given time-to-live per session.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a registry from a configured expiry in seconds.
    ///
    /// Zero means sessions never expire.
    pub fn with_expiry_secs(expiry_secs: u64) -> Self {
        let ttl = if expiry_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(expiry_secs))
        };
        Self::with_ttl(ttl)
    }

    /// Issue a fresh token for an identity.
    pub async fn issue(&self, identity: &str) -> String {
        let session = Session::new(identity, self.ttl);
        let token = session.token.clone();

        self.sessions.write().await.insert(token.clone(), session);

        info!(identity = %identity, "Session issued");
        token
    }

    /// Resolve a token to its identity.
    ///
    /// An expired session is removed on the way out and resolves to `None`.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired() => {
                    return Some(session.identity.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it under the write lock
        if let Some(session) = self.sessions.write().await.remove(token) {
            debug!(identity = %session.identity, "Expired session removed");
        }
        None
    }

    /// Remove a session by token. Returns whether one was removed.
    pub async fn revoke(&self, token: &str) -> bool {
        match self.sessions.write().await.remove(token) {
            Some(session) => {
                info!(identity = %session.identity, "Session revoked");
                true
            }
            None => {
                debug!("Revoke: session not found");
                false
            }
        }
    }

    /// Drop all expired sessions. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, s| !s.is_expired());

        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Purged expired sessions");
        }
        removed
    }

    /// Number of sessions currently held, including not-yet-purged expired ones.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_resolve() {
        let registry = SessionRegistry::new();

        let token = registry.issue("a@example.com").await;
        assert!(!token.is_empty());

        let identity = registry.resolve(&token).await;
        assert_eq!(identity.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let registry = SessionRegistry::new();

        assert!(registry.resolve("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let registry = SessionRegistry::new();

        let token1 = registry.issue("a@example.com").await;
        let token2 = registry.issue("a@example.com").await;

        assert_ne!(token1, token2);
    }

    #[tokio::test]
    async fn test_revoke() {
        let registry = SessionRegistry::new();
        let token = registry.issue("a@example.com").await;

        assert!(registry.revoke(&token).await);
        assert!(registry.resolve(&token).await.is_none());
        assert!(!registry.revoke(&token).await);
    }

    #[tokio::test]
    async fn test_sessions_without_ttl_persist() {
        let registry = SessionRegistry::new();
        let token = registry.issue("a@example.com").await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(registry.resolve(&token).await.is_some());
        assert_eq!(registry.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let registry = SessionRegistry::with_ttl(Some(Duration::from_millis(20)));
        let token = registry.issue("a@example.com").await;

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(registry.resolve(&token).await.is_none());
        // The expired entry was dropped during resolution
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let registry = SessionRegistry::with_ttl(Some(Duration::from_millis(20)));
        registry.issue("a@example.com").await;
        registry.issue("b@example.com").await;

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(registry.purge_expired().await, 2);
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_expiry_secs_zero_means_no_expiry() {
        let registry = SessionRegistry::with_expiry_secs(0);
        let token = registry.issue("a@example.com").await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(registry.resolve(&token).await.is_some());
    }
}
