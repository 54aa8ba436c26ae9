//! Message storage for Minimail.
//!
//! Messages are internal to the service; sending means writing a row the
//! recipient's inbox query will pick up.

mod repository;
mod types;

pub use repository::MessageRepository;
pub use types::{Message, NewMessage, TIME_FORMAT};
