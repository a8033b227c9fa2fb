//! LLM backend trait and the mock implementation used in tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{LlmError, Result};

/// A thread-safe, shareable backend handle.
pub type SharedBackend = Arc<dyn LlmBackend>;

/// Abstraction over a hosted LLM provider.
///
/// The contract is deliberately narrow: a prompt string goes in, the
/// model's completion text comes out. Anything richer (chat history,
/// tools, streaming) is out of scope for this service.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Human-readable backend name, used in log fields.
    fn name(&self) -> &str;

    /// Send a prompt and wait for the full completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Count billable characters for `text` using the provider's exact
    /// tokenizer.
    ///
    /// Optional: backends without a counting endpoint return
    /// [`LlmError::Unsupported`]. Callers must treat failure here as
    /// non-fatal and fall back to a local approximation.
    async fn count_tokens(&self, _text: &str) -> Result<u64> {
        Err(LlmError::Unsupported(format!(
            "{} does not support token counting",
            self.name()
        )))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// A scripted response for [`MockBackend`].
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this completion text.
    Text(String),
    /// Fail the invocation with a backend error carrying this message.
    Error(String),
}

impl MockResponse {
    /// Convenience constructor for a text response.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convenience constructor for a failing response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// A mock backend for testing purposes.
///
/// Returns pre-configured responses in order and records every prompt it
/// receives, so tests can assert both outputs and call counts.
#[derive(Debug, Default)]
pub struct MockBackend {
    responses: std::sync::Mutex<Vec<MockResponse>>,
    prompt_log: std::sync::Mutex<Vec<String>>,
}

impl MockBackend {
    /// Create a mock backend with the given scripted responses.
    ///
    /// Responses are consumed in order; requests beyond the script fail
    /// with a backend error.
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            prompt_log: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend that returns a single text response.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![MockResponse::text(text)])
    }

    /// All prompts sent to this backend, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompt_log.lock().unwrap().clone()
    }

    /// Number of completion requests made.
    pub fn request_count(&self) -> usize {
        self.prompt_log.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompt_log.lock().unwrap().push(prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::Backend(
                "MockBackend: no more responses available".to_string(),
            ));
        }
        match responses.remove(0) {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Error(message) => Err(LlmError::Backend(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_responses_in_order() {
        let backend = MockBackend::new(vec![
            MockResponse::text("first"),
            MockResponse::text("second"),
        ]);

        assert_eq!(backend.complete("a").await.unwrap(), "first");
        assert_eq!(backend.complete("b").await.unwrap(), "second");
        assert_eq!(backend.request_count(), 2);
        assert_eq!(backend.prompts(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_scripted_failure() {
        let backend = MockBackend::new(vec![MockResponse::error("boom")]);

        let err = backend.complete("a").await.unwrap_err();
        assert!(matches!(err, LlmError::Backend(ref msg) if msg == "boom"));
        // The failed prompt is still logged.
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_exhausted_script_errors() {
        let backend = MockBackend::new(vec![]);
        let err = backend.complete("a").await.unwrap_err();
        assert!(matches!(err, LlmError::Backend(_)));
    }

    #[tokio::test]
    async fn test_count_tokens_default_is_unsupported() {
        let backend = MockBackend::with_text("hi");
        let err = backend.count_tokens("some text").await.unwrap_err();
        assert!(matches!(err, LlmError::Unsupported(_)));
    }
}
