//! Session token authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::AuthGateway;
use crate::web::error::ApiError;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extractor for authenticated identities.
///
/// Use this extractor to require a valid session token for a handler.
/// The token is read from the `X-Auth-Token` header, falling back to a
/// `token` query parameter.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Email address the session token resolves to.
    pub identity: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = extract_token(parts).ok_or_else(ApiError::unauthorized)?;

            let gateway = parts.extensions.get::<Arc<AuthGateway>>().ok_or_else(|| {
                tracing::error!("Auth gateway missing from request extensions");
                ApiError::unauthorized()
            })?;

            let identity = gateway
                .authenticate(&token)
                .await
                .ok_or_else(ApiError::unauthorized)?;

            Ok(AuthUser { identity })
        })
    }
}

/// Optional authentication extractor.
///
/// Similar to AuthUser but never rejects; handlers decide what an
/// unauthenticated request gets.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = match extract_token(parts) {
                Some(token) => token,
                None => return Ok(OptionalAuthUser(None)),
            };

            let gateway = match parts.extensions.get::<Arc<AuthGateway>>() {
                Some(gateway) => gateway,
                None => return Ok(OptionalAuthUser(None)),
            };

            Ok(OptionalAuthUser(gateway.authenticate(&token).await))
        })
    }
}

/// Middleware function to inject the auth gateway into request extensions.
pub async fn auth_context(
    gateway: Arc<AuthGateway>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(gateway);
    next.run(request).await
}

/// Pull the session token from the header or the `token` query parameter.
///
/// A present header wins even when a query token is also supplied.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(value) = parts
        .headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(value.to_string());
    }

    let query = parts.uri.query().unwrap_or("");
    query.split('&').find_map(|pair| {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next()?;
        let value = kv.next()?;
        if key == "token" {
            urlencoding::decode(value).ok().map(|s| s.into_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LoginOutcome;
    use crate::db::Database;
    use crate::resolver::DomainResolver;
    use async_trait::async_trait;

    fn parts_for(uri: &str, token_header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token_header {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_extract_token_from_header() {
        let parts = parts_for("/api/send", Some("abc-123"));
        assert_eq!(extract_token(&parts).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_extract_token_from_query() {
        let parts = parts_for("/api/inbox?token=abc%2D123", None);
        assert_eq!(extract_token(&parts).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_header_wins_over_query() {
        let parts = parts_for("/api/inbox?token=from-query", Some("from-header"));
        assert_eq!(extract_token(&parts).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_extract_token_absent() {
        let parts = parts_for("/api/inbox?other=1", None);
        assert!(extract_token(&parts).is_none());
    }

    struct AllReachable;

    #[async_trait]
    impl DomainResolver for AllReachable {
        async fn reachable(&self, _domain: &str) -> bool {
            true
        }
    }

    async fn gateway_with_session() -> (Arc<AuthGateway>, String) {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let gateway = Arc::new(AuthGateway::new(db, Arc::new(AllReachable)));

        gateway.register("a@example.com", "pw").await.unwrap();
        let token = match gateway.login("a@example.com", "pw").await.unwrap() {
            LoginOutcome::Granted(token) => token,
            LoginOutcome::Rejected => panic!("Expected login to succeed"),
        };

        (gateway, token)
    }

    #[tokio::test]
    async fn test_auth_user_resolves_identity() {
        let (gateway, token) = gateway_with_session().await;

        let mut parts = parts_for("/api/send", Some(&token));
        parts.extensions.insert(gateway);

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.identity, "a@example.com");
    }

    #[tokio::test]
    async fn test_auth_user_rejects_unknown_token() {
        let (gateway, _token) = gateway_with_session().await;

        let mut parts = parts_for("/api/send", Some("not-a-session"));
        parts.extensions.insert(gateway);

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_optional_auth_user_absent_token() {
        let (gateway, _token) = gateway_with_session().await;

        let mut parts = parts_for("/api/inbox", None);
        parts.extensions.insert(gateway);

        let OptionalAuthUser(identity) = OptionalAuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(identity.is_none());
    }
}
