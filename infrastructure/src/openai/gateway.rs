//! OpenAI-compatible gateway (LM Studio, llama.cpp server, vLLM, ...)
//!
//! Implements [`LlmGateway`] over `POST {base_url}/chat/completions` and
//! `GET {base_url}/models`.

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ModelList};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use submind_application::{CompletionRequest, GatewayError, LlmGateway};
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gateway to an OpenAI-compatible HTTP server
#[derive(Clone)]
pub struct OpenAiCompatibleGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                GatewayError::ConnectionError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Turn a non-success response into an error carrying status and body
    async fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), status.canonical_reason(), &body))
    }
}

fn status_error(code: u16, reason: Option<&str>, body: &str) -> GatewayError {
    let text = format!("HTTP {} {}: {}", code, reason.unwrap_or(""), body.trim());
    match code {
        404 => GatewayError::ModelNotAvailable(text),
        _ => GatewayError::RequestFailed(text),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        debug!(
            "POST {} (model {}, {} messages)",
            self.endpoint("chat/completions"),
            request.model,
            request.messages.len()
        );

        let response = self
            .authorize(self.client.post(self.endpoint("chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = Self::check_status(response).await?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parsed
            .into_text()
            .ok_or_else(|| GatewayError::MalformedResponse("response has no choices".to_string()))
    }

    async fn available_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .authorize(self.client.get(self.endpoint("models")))
            .send()
            .await
            .map_err(transport_error)?;
        let response = Self::check_status(response).await?;

        let list: ModelList = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}
