//! Scripted provider for tests and offline runs.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{ChatRequest, ChatResponse, ModelProvider};
use crate::{Error, Result};

/// A provider that replays queued replies and records what it was asked.
///
/// Each `chat()` call consumes one queued reply. Once the queue is empty
/// every call fails with `Error::ProviderApi`.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a provider with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that answers once with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let provider = Self::new();
        provider.queue_reply(text);
        provider
    }

    /// Create a provider whose first call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let provider = Self::new();
        provider.queue_failure(message);
        provider
    }

    /// Queue a successful text reply.
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.lock_replies().push_back(Ok(text.into()));
    }

    /// Queue a failed call.
    pub fn queue_failure(&self, message: impl Into<String>) {
        self.lock_replies().push_back(Err(message.into()));
    }

    /// Number of `chat()` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_replies(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<std::result::Result<String, String>>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        match self.lock_replies().pop_front() {
            Some(Ok(text)) => Ok(ChatResponse::from_text(text)),
            Some(Err(message)) => Err(Error::ProviderApi(message)),
            None => Err(Error::ProviderApi("mock provider has no queued reply".to_string())),
        }
    }
}
