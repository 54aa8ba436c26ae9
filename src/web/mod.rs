//! Web API module for Minimail.
//!
//! This module provides the REST API the browser client talks to, plus
//! static file serving for the client itself.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
