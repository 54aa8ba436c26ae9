//! Data Transfer Objects for the Minimail API.

pub mod extract;
pub mod request;
pub mod response;

pub use extract::LooseBody;
pub use request::*;
pub use response::*;
