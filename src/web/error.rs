//! API error handling for the Minimail web interface.
//!
//! The API speaks a small fixed set of response bodies; each constructor
//! here produces one of them verbatim. Browser and command-line clients
//! match on these exact strings.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::auth::RegistrationError;

/// A terminal API response carrying a fixed status and JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn failure(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({"success": false, "message": message}),
        }
    }

    /// 400 - a required body field is absent.
    pub fn missing_fields() -> Self {
        Self::failure(StatusCode::BAD_REQUEST, "Missing fields")
    }

    /// 400 - the email does not match the accepted format.
    pub fn invalid_email() -> Self {
        Self::failure(StatusCode::BAD_REQUEST, "Invalid email format")
    }

    /// 400 - the email domain does not resolve.
    pub fn domain_not_found() -> Self {
        Self::failure(StatusCode::BAD_REQUEST, "Email domain not found")
    }

    /// 400 - registration could not be completed.
    ///
    /// Covers both duplicate identities and storage failures; the body
    /// deliberately does not say which.
    pub fn registration_failed() -> Self {
        Self::failure(
            StatusCode::BAD_REQUEST,
            "Registration failed (user exists or other error)",
        )
    }

    /// 400 - login request with a missing field. No message key.
    pub fn login_missing_fields() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({"success": false}),
        }
    }

    /// 401 - no valid session token on a send request.
    pub fn unauthorized() -> Self {
        Self::failure(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    /// 401 - no valid session token on a listing request. The body is an
    /// empty array so list-rendering clients degrade gracefully.
    pub fn listing_unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: json!([]),
        }
    }

    /// 400 - the recipient address does not match the accepted format.
    pub fn invalid_recipient() -> Self {
        Self::failure(StatusCode::BAD_REQUEST, "Invalid recipient email format")
    }

    /// 405 - wrong HTTP method on an API route.
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            body: json!({"error": "Method not allowed"}),
        }
    }

    /// 400 - suggestion request without a subject parameter.
    pub fn missing_subject() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({"body": ""}),
        }
    }

    /// The HTTP status this error responds with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The JSON body this error responds with.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.body)
    }
}

impl std::error::Error for ApiError {}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(_) => ApiError::invalid_email(),
            RegistrationError::DomainNotFound => ApiError::domain_not_found(),
            RegistrationError::AlreadyExists => ApiError::registration_failed(),
            RegistrationError::Database(msg) => {
                tracing::error!(error = %msg, "Registration failed on storage");
                ApiError::registration_failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::missing_fields().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid_email().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::domain_not_found().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::registration_failed().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::login_missing_fields().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::listing_unauthorized().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::invalid_recipient().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::method_not_allowed().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::missing_subject().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bodies_are_exact() {
        assert_eq!(
            ApiError::missing_fields().body(),
            &json!({"success": false, "message": "Missing fields"})
        );
        assert_eq!(
            ApiError::registration_failed().body(),
            &json!({"success": false, "message": "Registration failed (user exists or other error)"})
        );
        assert_eq!(
            ApiError::login_missing_fields().body(),
            &json!({"success": false})
        );
        assert_eq!(ApiError::listing_unauthorized().body(), &json!([]));
        assert_eq!(
            ApiError::method_not_allowed().body(),
            &json!({"error": "Method not allowed"})
        );
        assert_eq!(ApiError::missing_subject().body(), &json!({"body": ""}));
    }

    #[test]
    fn test_login_missing_fields_has_no_message_key() {
        let body = ApiError::login_missing_fields();
        assert!(body.body().get("message").is_none());
    }

    #[test]
    fn test_from_registration_error() {
        let err: ApiError = RegistrationError::DomainNotFound.into();
        assert_eq!(
            err.body(),
            &json!({"success": false, "message": "Email domain not found"})
        );

        let err: ApiError = RegistrationError::AlreadyExists.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = RegistrationError::Database("boom".to_string()).into();
        assert_eq!(
            err.body(),
            &json!({"success": false, "message": "Registration failed (user exists or other error)"})
        );
    }
}
