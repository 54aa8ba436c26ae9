//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::auth::{login, register};
use super::handlers::mail::{inbox, send, sent};
use super::handlers::suggest::suggest;
use super::handlers::AppState;
use super::middleware::{auth_context, create_cors_layer};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Account routes (no session required)
    let account_routes = Router::new()
        .route("/register", post(register).fallback(method_not_allowed))
        .route("/login", post(login).fallback(method_not_allowed));

    // Mailbox routes (session resolved per handler)
    let mail_routes = Router::new()
        .route("/send", post(send).fallback(method_not_allowed))
        .route("/inbox", get(inbox).fallback(method_not_allowed))
        .route("/sent", get(sent).fallback(method_not_allowed));

    // Suggestion route
    let suggest_routes = Router::new().route("/ml", get(suggest).fallback(method_not_allowed));

    // Combine API routes
    let api_routes = Router::new()
        .merge(account_routes)
        .merge(mail_routes)
        .merge(suggest_routes);

    // Clone the gateway for the middleware closure
    let gateway = app_state.gateway.clone();

    // Build the main router with middleware
    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let gateway = gateway.clone();
                    auth_context(gateway, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving the browser client from a directory.
///
/// Returns None when the directory does not exist so the server can come
/// up API-only.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let path = std::path::Path::new(static_path);
    if !path.is_dir() {
        tracing::warn!(path = static_path, "Static path not found, serving API only");
        return None;
    }

    let serve_dir = ServeDir::new(path).append_index_html_on_directories(true);
    Some(Router::new().fallback_service(serve_dir))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Fallback for API routes hit with an unsupported method.
async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
