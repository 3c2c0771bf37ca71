//! OpenAI-compatible model server adapter

pub mod gateway;
mod types;

pub use gateway::{DEFAULT_TIMEOUT, OpenAiCompatibleGateway};
