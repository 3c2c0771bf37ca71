//! Model backend adapter
//!
//! Wraps a raw [`LlmGateway`] with the behaviour every persona turn relies
//! on: rate-limit classification of failures and cleanup of the generated
//! text.

use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use std::sync::Arc;
use submind_domain::{ChatMessage, RateLimitDetector, clean_response};
use thiserror::Error;
use tracing::{debug, warn};

/// Classified backend failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Transient; the caller may try its next fallback model
    #[error("Rate limit exceeded for {model}: {message}")]
    RateLimitExceeded { model: String, message: String },

    #[error("Backend error for {model}: {message}")]
    Backend { model: String, message: String },
}

impl BackendError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, BackendError::RateLimitExceeded { .. })
    }

    pub fn model(&self) -> &str {
        match self {
            BackendError::RateLimitExceeded { model, .. } | BackendError::Backend { model, .. } => {
                model
            }
        }
    }
}

/// Gateway plus failure classification and output cleanup
#[derive(Clone)]
pub struct ModelBackend {
    gateway: Arc<dyn LlmGateway>,
    detector: RateLimitDetector,
}

impl ModelBackend {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            detector: RateLimitDetector::default(),
        }
    }

    pub fn with_detector(mut self, detector: RateLimitDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn LlmGateway> {
        &self.gateway
    }

    /// Generate one reply with `model`
    ///
    /// The returned text has already been passed through [`clean_response`].
    pub async fn generate_response(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, BackendError> {
        let request = CompletionRequest::new(model, messages.to_vec())
            .with_temperature(temperature)
            .with_max_tokens(max_tokens);

        debug!("Requesting completion from {} ({} turns)", model, messages.len());

        match self.gateway.complete(&request).await {
            Ok(raw) => Ok(clean_response(&raw)),
            Err(e) => {
                let message = e.to_string();
                if self.detector.is_rate_limit(&message) {
                    Err(BackendError::RateLimitExceeded {
                        model: model.to_string(),
                        message,
                    })
                } else {
                    Err(BackendError::Backend {
                        model: model.to_string(),
                        message,
                    })
                }
            }
        }
    }

    /// Models offered by the server; empty on failure
    pub async fn list_models(&self) -> Vec<String> {
        match self.gateway.available_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("Failed to list models: {}", e);
                Vec::new()
            }
        }
    }

    /// Whether the server is reachable and serves at least one model
    pub async fn validate_connection(&self) -> bool {
        match self.gateway.available_models().await {
            Ok(models) => !models.is_empty(),
            Err(e) => {
                warn!("Backend connection check failed: {}", e);
                false
            }
        }
    }
}
