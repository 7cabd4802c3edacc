//! Mock chat backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use studyflow_core::traits::{ChatModel, CompletionRequest, CompletionResponse, TokenUsage};

use crate::error::ProviderError;

/// A chat backend that answers from a table instead of the network.
///
/// Replies are chosen by prompt substring; a mock can also be told to fail
/// every call or to stall, for exercising fallback paths.
pub struct MockChat {
    /// Map of prompt substring → reply.
    responses: HashMap<String, String>,
    /// Reply if no prompt matches.
    default_response: String,
    /// When set, every call fails with an API error of this status.
    fail_with_status: Option<u16>,
    /// Artificial latency per call.
    delay: Option<Duration>,
    call_count: AtomicU32,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockChat {
    /// Create a mock with the given prompt→reply mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "[]".to_string(),
            fail_with_status: None,
            delay: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always returns the same reply.
    pub fn with_fixed_response(response: &str) -> Self {
        let mut mock = Self::new(HashMap::new());
        mock.default_response = response.to_string();
        mock
    }

    /// A mock whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        let mut mock = Self::new(HashMap::new());
        mock.fail_with_status = Some(status);
        mock
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChat {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = self.fail_with_status {
            return Err(ProviderError::ApiError {
                status,
                message: "mock failure".into(),
            }
            .into());
        }

        let content = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        let prompt_tokens = (request.prompt.len() / 4) as u32;
        let completion_tokens = (content.len() / 4) as u32;

        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }
}
