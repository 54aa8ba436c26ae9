//! Authentication handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::auth::{AuthGateway, LoginOutcome};
use crate::db::SharedDatabase;
use crate::suggest::SubjectSuggester;
use crate::web::dto::{ApiStatus, LoginRequest, LoginSuccess, LooseBody, RegisterRequest};
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Registration, login and session resolution.
    pub gateway: Arc<AuthGateway>,
    /// Body suggestion runner.
    pub suggester: SubjectSuggester,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: SharedDatabase,
        gateway: Arc<AuthGateway>,
        suggester: SubjectSuggester,
    ) -> Self {
        Self {
            db,
            gateway,
            suggester,
        }
    }
}

/// POST /api/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    LooseBody(req): LooseBody<RegisterRequest>,
) -> Result<Json<ApiStatus>, ApiError> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::missing_fields());
    };

    state.gateway.register(&email, &password).await?;

    Ok(Json(ApiStatus::ok()))
}

/// POST /api/login - Exchange credentials for a session token.
///
/// A rejected login answers 200 with success false; the body never says
/// whether the account exists or the password was wrong.
pub async fn login(
    State(state): State<Arc<AppState>>,
    LooseBody(req): LooseBody<LoginRequest>,
) -> Response {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return ApiError::login_missing_fields().into_response();
    };

    match state.gateway.login(&email, &password).await {
        Ok(LoginOutcome::Granted(token)) => Json(LoginSuccess::new(token)).into_response(),
        Ok(LoginOutcome::Rejected) => Json(ApiStatus::rejected()).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Login failed on storage");
            Json(ApiStatus::rejected()).into_response()
        }
    }
}
