//! Web server for Minimail.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::auth::AuthGateway;
use crate::config::{Config, WebConfig};
use crate::db::SharedDatabase;
use crate::resolver::DnsResolver;
use crate::suggest::SubjectSuggester;

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_static_router};

/// Web server for the API and the browser client.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
    /// Session expiry in seconds. Zero disables the purge task.
    session_expiry_secs: u64,
}

impl WebServer {
    /// Create a new web server, wiring the gateway and suggester from
    /// configuration.
    pub fn new(config: &Config, db: SharedDatabase) -> Self {
        let resolver = Arc::new(DnsResolver::new(Duration::from_secs(
            config.registration.dns_timeout_secs,
        )));
        let gateway = Arc::new(AuthGateway::with_config(
            db.clone(),
            resolver,
            config.registration.verify_domain,
            config.session.expiry_secs,
        ));
        let suggester = SubjectSuggester::from_config(&config.suggest);
        let app_state = Arc::new(AppState::new(db, gateway, suggester));

        Self::with_state(&config.web, config.session.expiry_secs, app_state)
    }

    /// Create a new web server around prepared application state.
    pub fn with_state(
        config: &WebConfig,
        session_expiry_secs: u64,
        app_state: Arc<AppState>,
    ) -> Self {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .expect("Invalid web server address");

        Self {
            addr,
            app_state,
            web_config: config.clone(),
            session_expiry_secs,
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session purge background task.
    ///
    /// Runs every minute and drops sessions whose expiry has passed.
    fn start_session_purge_task(gateway: Arc<AuthGateway>) {
        tokio::spawn(async move {
            // Purge interval: 1 minute
            const PURGE_INTERVAL_SECS: u64 = 60;

            let mut interval = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let removed = gateway.purge_expired_sessions().await;
                if removed > 0 {
                    tracing::info!(removed, "Purged expired sessions");
                } else {
                    tracing::debug!("No expired sessions to purge");
                }
            }
        });
    }

    fn build_router(&self) -> axum::Router {
        let mut router = create_router(self.app_state.clone(), &self.web_config.cors_origins)
            .merge(create_health_router());

        // Add static file serving if enabled
        if self.web_config.serve_static {
            if let Some(static_router) = create_static_router(&self.web_config.static_path) {
                router = router.merge(static_router);
            }
        }

        // Add gzip compression layer
        router.layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the purge task after a successful bind
        if self.session_expiry_secs > 0 {
            Self::start_session_purge_task(self.app_state.gateway.clone());
            tracing::info!("Session purge task started (runs every minute)");
        }

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        if self.session_expiry_secs > 0 {
            Self::start_session_purge_task(self.app_state.gateway.clone());
            tracing::info!("Session purge task started (runs every minute)");
        }

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
