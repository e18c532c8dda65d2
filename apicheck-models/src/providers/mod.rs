//! Model provider trait and implementations.
//!
//! The [`ModelProvider`] trait is the whole contract the quality assessor
//! relies on: hand over a prompt, get text back or an error.
//!
//! # Example
//!
//! ```ignore
//! use apicheck_models::providers::{ChatRequest, Message, ModelProvider};
//!
//! async fn ask(provider: &dyn ModelProvider) -> apicheck_models::Result<String> {
//!     let request = ChatRequest::new(
//!         "claude-sonnet-4-20250514",
//!         vec![Message::user("Say hello in exactly 3 words")],
//!     )
//!     .max_tokens(100);
//!
//!     let response = provider.chat(request).await?;
//!     Ok(response.text())
//! }
//! ```

mod anthropic;
mod mock;
mod types;

use async_trait::async_trait;

pub use anthropic::{ANTHROPIC_VERSION, AnthropicProvider, DEFAULT_BASE_URL};
pub use mock::MockProvider;
pub use types::*;

use crate::Result;

/// Trait for model providers.
///
/// A provider performs a single non-streaming completion per call. Retries
/// and fallbacks are the caller's business.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Returns the provider name (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Perform a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}
