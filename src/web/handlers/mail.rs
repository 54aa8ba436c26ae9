//! Mail handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::auth::validation::validate_email;
use crate::mail::{MessageRepository, NewMessage};
use crate::web::dto::{ApiStatus, InboxEntry, LooseBody, SendRequest, SentEntry};
use crate::web::error::ApiError;
use crate::web::handlers::auth::AppState;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /api/send - Deliver a message.
///
/// The sender is always the session identity; any sender claimed in the
/// request body is ignored.
pub async fn send(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    LooseBody(req): LooseBody<SendRequest>,
) -> Response {
    let (Some(to), Some(subject), Some(body)) = (req.to, req.subject, req.body) else {
        return ApiError::missing_fields().into_response();
    };

    if validate_email(&to).is_err() {
        return ApiError::invalid_recipient().into_response();
    }

    let repo = MessageRepository::new(state.db.pool());
    match repo
        .create(&NewMessage::new(user.identity, to, subject, body))
        .await
    {
        Ok(message) => {
            tracing::debug!(id = message.id, "Message stored");
            Json(ApiStatus::ok()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Send failed on storage");
            Json(ApiStatus::rejected()).into_response()
        }
    }
}

/// GET /api/inbox - List messages addressed to the session identity.
///
/// Unauthenticated requests and storage failures both produce an empty
/// array, so list-rendering clients always get something iterable.
pub async fn inbox(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(identity): OptionalAuthUser,
) -> Result<Json<Vec<InboxEntry>>, ApiError> {
    let Some(identity) = identity else {
        return Err(ApiError::listing_unauthorized());
    };

    let repo = MessageRepository::new(state.db.pool());
    let messages = match repo.list_inbox(&identity).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!(error = %e, "Inbox listing failed on storage");
            Vec::new()
        }
    };

    Ok(Json(messages.into_iter().map(InboxEntry::from).collect()))
}

/// GET /api/sent - List messages the session identity has sent.
pub async fn sent(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(identity): OptionalAuthUser,
) -> Result<Json<Vec<SentEntry>>, ApiError> {
    let Some(identity) = identity else {
        return Err(ApiError::listing_unauthorized());
    };

    let repo = MessageRepository::new(state.db.pool());
    let messages = match repo.list_sent(&identity).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!(error = %e, "Sent listing failed on storage");
            Vec::new()
        }
    };

    Ok(Json(messages.into_iter().map(SentEntry::from).collect()))
}
