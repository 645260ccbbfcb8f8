//! HTTP handlers for the relay API.

pub mod chat;
pub mod health;
pub mod image_prompt;
pub mod translate;

mod error;
mod extract;

pub use error::RelayError;
pub use extract::JsonBody;
