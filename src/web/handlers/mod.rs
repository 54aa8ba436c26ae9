//! HTTP request handlers.

pub mod auth;
pub mod mail;
pub mod suggest;

pub use auth::AppState;
