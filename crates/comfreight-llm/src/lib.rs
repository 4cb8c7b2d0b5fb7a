//! ComFreight LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `comfreight-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use comfreight_llm::MockProvider;
//! use comfreight_domain::traits::LlmProvider;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = rt.block_on(provider.generate_structured("test prompt", "{}")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use comfreight_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API key missing, invalid, or lacking permission
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<String, MockReply>,
    call_count: usize,
    last_prompt: Option<String>,
    last_schema: Option<String>,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Clones share state, so a clone handed to an analyzer can still be inspected.
///
/// # Examples
///
/// ```
/// use comfreight_llm::MockProvider;
/// use comfreight_domain::traits::LlmProvider;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(rt.block_on(provider.generate_structured("prompt1", "{}")).unwrap(), "response1");
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    latency: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            latency: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider that fails every call
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.state().replies.insert(String::new(), MockReply::Fail);
        provider
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .replies
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.state().replies.insert(prompt.into(), MockReply::Fail);
    }

    /// Get the number of calls made so far
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.state().call_count = 0;
    }

    /// Prompt of the most recent call
    pub fn last_prompt(&self) -> Option<String> {
        self.state().last_prompt.clone()
    }

    /// Schema of the most recent call
    pub fn last_schema(&self) -> Option<String> {
        self.state().last_schema.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // a poisoned lock only means another test thread panicked mid-call
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        let mut state = self.state();
        state.call_count += 1;
        state.last_prompt = Some(prompt.to_string());
        state.last_schema = Some(schema.to_string());

        // An entry under the empty prompt applies to every prompt
        let reply = state
            .replies
            .get(prompt)
            .or_else(|| state.replies.get(""))
            .cloned();

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.pause().await;
        self.reply(prompt, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", "{}").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate_structured("hello", "{}").await.unwrap(), "world");
        assert_eq!(provider.generate_structured("foo", "{}").await.unwrap(), "bar");
        assert_eq!(
            provider.generate_structured("unknown", "{}").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("prompt1", "{}").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("prompt2", "{}").await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate_structured("bad prompt", "{}").await;
        assert!(matches!(result, Err(LlmError::Other(_))));
        assert!(provider.generate_structured("good prompt", "{}").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        assert!(provider.generate_structured("anything", "{}").await.is_err());
        assert!(provider.generate_structured("else", "{}").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_provider_records_schema() {
        let provider = MockProvider::new("{}");
        provider
            .generate_structured("prompt", r#"{"type":"OBJECT"}"#)
            .await
            .unwrap();

        assert_eq!(provider.last_prompt().as_deref(), Some("prompt"));
        assert_eq!(provider.last_schema().as_deref(), Some(r#"{"type":"OBJECT"}"#));

        provider.generate_structured("other", "{}").await.unwrap();
        assert_eq!(provider.last_schema().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured("test", "{}").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
