//! Minimail - Minimal Webmail Service
//!
//! A small self-contained mail service with a browser client, implemented
//! in Rust. Accounts, session tokens and a single message store sit behind
//! a JSON-over-HTTP API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mail;
pub mod resolver;
pub mod suggest;
pub mod web;

pub use auth::{
    hash_password, AuthGateway, Credential, CredentialStore, LoginOutcome, RegistrationError,
    Session, SessionRegistry, StoreError, ValidationError, VerifyOutcome,
};
pub use config::Config;
pub use db::{Database, SharedDatabase};
pub use error::{MinimailError, Result};
pub use mail::{Message, MessageRepository, NewMessage};
pub use resolver::{DnsResolver, DomainResolver};
pub use suggest::SubjectSuggester;
pub use web::{create_router, ApiError, WebServer};
