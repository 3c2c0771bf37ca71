//! LLM Gateway port
//!
//! Defines the interface for communicating with a model server.

use async_trait::async_trait;
use submind_domain::ChatMessage;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: submind_domain::persona::DEFAULT_TEMPERATURE,
            max_tokens: submind_domain::persona::DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to a model server.
/// Implementations (adapters) live in the infrastructure layer. The text
/// returned by `complete` is raw; classification and cleanup happen in
/// [`ModelBackend`](crate::backend::ModelBackend).
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Run one chat completion and return the generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;

    /// Get available model identifiers
    async fn available_models(&self) -> Result<Vec<String>, GatewayError>;
}
