//! Anthropic Messages API provider.
//!
//! # Example
//!
//! ```ignore
//! use apicheck_models::auth::CredentialStore;
//! use apicheck_models::providers::AnthropicProvider;
//!
//! let store = CredentialStore::new("apicheck").with_env_fallback();
//! let provider = AnthropicProvider::from_store(&store)?;
//! let provider = provider.with_base_url("https://proxy.internal:8443");
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatRequest, ChatResponse, ContentBlock, Message, ModelProvider, StopReason, Usage};
use crate::auth::{ApiKey, CredentialStore};
use crate::{Error, Result};

/// Default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const PROVIDER_NAME: &str = "anthropic";

// ────────────────────────────────────────────────────────────────────────────
// Messages API wire types
// ────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /v1/messages`.
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl<'a> From<&'a ChatRequest> for MessagesRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: &request.messages,
            system: request.system.as_deref(),
            temperature: request.temperature,
        }
    }
}

/// Response body from `POST /v1/messages`.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    #[serde(default)]
    pub usage: MessagesUsage,
}

/// Usage block as reported by the Messages API.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl From<MessagesResponse> for ChatResponse {
    fn from(response: MessagesResponse) -> Self {
        Self {
            content: response.content,
            stop_reason: response.stop_reason.unwrap_or(StopReason::EndTurn),
            usage: Usage::new(response.usage.input_tokens, response.usage.output_tokens),
        }
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Pull a readable message out of an error body, falling back to the raw text.
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{} ({})", envelope.error.message, envelope.error.kind),
        Err(_) => body.trim().to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// AnthropicProvider
// ────────────────────────────────────────────────────────────────────────────

/// Anthropic cloud provider.
pub struct AnthropicProvider {
    base_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl AnthropicProvider {
    /// Create a provider against the public API.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from stored credentials.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsNotFound` when no API key is available, so a
    /// missing key surfaces at construction rather than on the first request.
    pub fn from_store(store: &CredentialStore) -> Result<Self> {
        let api_key = store.get(PROVIDER_NAME)?;
        Ok(Self::new(api_key))
    }

    /// Point the provider at a different base URL (proxy, gateway, ...).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by a client-side timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Request(e.to_string()))?;
        Ok(self)
    }

    /// Get the base URL for this provider.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = MessagesRequest::from(&request);
        debug!(model = %request.model, max_tokens = request.max_tokens, "sending messages request");

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProviderApi(format!(
                "Anthropic API returned {}: {}",
                status,
                describe_error_body(&body)
            )));
        }

        let messages: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        debug!(
            input_tokens = messages.usage.input_tokens,
            output_tokens = messages.usage.output_tokens,
            "messages request completed"
        );
        Ok(messages.into())
    }
}
