//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{auth_context, AuthUser, OptionalAuthUser, AUTH_TOKEN_HEADER};
pub use cors::create_cors_layer;
