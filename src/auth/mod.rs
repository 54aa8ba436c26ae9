//! Authentication module for Minimail.
//!
//! This module provides credential hashing and storage, session tokens,
//! registration, and login.

mod credential;
mod gateway;
mod session;
mod store;
pub mod validation;

pub use credential::{hash_password, Credential, SALT_LEN};
pub use gateway::{AuthGateway, LoginOutcome, RegistrationError};
pub use session::{Session, SessionRegistry};
pub use store::{CredentialStore, StoreError, VerifyOutcome};
pub use validation::ValidationError;
