//! Recipient domain reachability checks.
//!
//! Registration refuses addresses whose domain does not resolve in DNS.
//! The check sits behind a trait so the web layer can be tested without
//! touching the network.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Default DNS lookup timeout (5 seconds).
pub const DEFAULT_DNS_TIMEOUT_SECS: u64 = 5;

/// Resolves whether an email domain is reachable.
#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// Check whether the given domain resolves to at least one address.
    async fn reachable(&self, domain: &str) -> bool;
}

/// [`DomainResolver`] backed by the system resolver.
///
/// A lookup that errors or exceeds the timeout counts as unreachable.
#[derive(Debug, Clone)]
pub struct DnsResolver {
    timeout: Duration,
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_DNS_TIMEOUT_SECS))
    }
}

impl DnsResolver {
    /// Create a resolver with the given lookup timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DomainResolver for DnsResolver {
    async fn reachable(&self, domain: &str) -> bool {
        let lookup = tokio::net::lookup_host((domain, 0u16));

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(e)) => {
                debug!(domain = %domain, error = %e, "Domain lookup failed");
                false
            }
            Err(_) => {
                debug!(
                    domain = %domain,
                    timeout_secs = self.timeout.as_secs(),
                    "Domain lookup timed out"
                );
                false
            }
        }
    }
}
