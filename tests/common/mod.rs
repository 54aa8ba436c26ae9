//! Shared helpers for the Web API integration tests.
//!
//! Builds an axum-test `TestServer` over an in-memory database, with a
//! fixed-answer resolver and a configurable suggestion command standing in
//! for the real DNS and helper-process dependencies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::{json, Value};

use minimail::auth::AuthGateway;
use minimail::db::{Database, SharedDatabase};
use minimail::resolver::DomainResolver;
use minimail::suggest::SubjectSuggester;
use minimail::web::handlers::AppState;
use minimail::web::router::{create_health_router, create_router};

/// Default suggestion command for tests: echo produces "Re: <subject>".
pub fn echo_suggest_command() -> Vec<String> {
    vec!["/bin/echo".to_string(), "Re:".to_string()]
}

/// Domain resolver with a fixed answer, so tests never touch DNS.
pub struct StaticResolver(pub bool);

#[async_trait]
impl DomainResolver for StaticResolver {
    async fn reachable(&self, _domain: &str) -> bool {
        self.0
    }
}

/// Create a test server with an in-memory database.
///
/// Every email domain counts as reachable and the suggestion helper is a
/// plain echo.
pub async fn create_test_server() -> (TestServer, SharedDatabase) {
    create_test_server_with(true, echo_suggest_command(), Duration::from_secs(5)).await
}

/// Create a test server with explicit resolver and suggester behavior.
pub async fn create_test_server_with(
    domain_reachable: bool,
    suggest_command: Vec<String>,
    suggest_timeout: Duration,
) -> (TestServer, SharedDatabase) {
    // Create in-memory database
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    // Create app state around the fixed external dependencies
    let gateway = Arc::new(AuthGateway::with_config(
        db.clone(),
        Arc::new(StaticResolver(domain_reachable)),
        true,
        0,
    ));
    let suggester = SubjectSuggester::new(suggest_command, suggest_timeout);
    let app_state = Arc::new(AppState::new(db.clone(), gateway, suggester));

    // Create router and test server
    let router = create_router(app_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Register an account through the API and return the response body.
pub async fn register_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/register")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Log in through the API and return the issued session token.
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;

    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("No token in login response")
        .to_string()
}

/// Insert a raw credential string, bypassing registration and hashing.
pub async fn insert_raw_credential(db: &Database, email: &str, stored: &str) {
    sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
        .bind(email)
        .bind(stored)
        .execute(db.pool())
        .await
        .expect("Failed to insert credential");
}

/// Fetch the stored credential string for an identity.
pub async fn stored_credential(db: &Database, email: &str) -> Option<String> {
    sqlx::query_scalar("SELECT password FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(db.pool())
        .await
        .expect("Failed to read credential")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_server() {
        let (server, _db) = create_test_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }
}
