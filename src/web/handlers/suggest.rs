//! Body suggestion handler.

use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use crate::web::dto::{SuggestParams, SuggestionResponse};
use crate::web::error::ApiError;
use crate::web::handlers::auth::AppState;

/// GET /api/ml - Suggest a message body for a subject line.
///
/// The helper command output is returned verbatim. A failed or slow helper
/// yields an empty body rather than an error, so composing never blocks on
/// the suggestion machinery.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestionResponse>, ApiError> {
    let Some(subject) = params.subject else {
        return Err(ApiError::missing_subject());
    };

    let body = state.suggester.suggest(&subject).await;

    Ok(Json(SuggestionResponse { body }))
}
