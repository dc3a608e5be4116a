//! Mock chat backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use truckscout_core::{ChatBackend, ChatMessage};
//! use truckscout_inference::mock::MockChatBackend;
//!
//! let backend = MockChatBackend::new()
//!     .with_fixed_response("Test response")
//!     .with_response_mapping("html email", "<p>Hallo</p>");
//! assert_eq!(backend.model_name(), "mock-chat");
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use truckscout_core::{ChatBackend, ChatMessage, Error, Result};

/// Mock chat backend for testing.
///
/// Replies are chosen in this order: a mapping whose needle occurs in the
/// first message, then the next queued reply, then the default response.
#[derive(Clone)]
pub struct MockChatBackend {
    config: Arc<MockConfig>,
    queued: Arc<Mutex<VecDeque<String>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    model: String,
    default_response: String,
    mapped_responses: HashMap<String, String>,
    fail_all: bool,
    fail_when: Vec<String>,
    latency_ms: u64,
}

/// A recorded call to [`MockChatBackend::complete`].
#[derive(Debug, Clone)]
pub struct MockCall {
    pub messages: Vec<ChatMessage>,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            model: "mock-chat".to_string(),
            default_response: "Mock response".to_string(),
            mapped_responses: HashMap::new(),
            fail_all: false,
            fail_when: Vec::new(),
            latency_ms: 0,
        }
    }
}

impl MockChatBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the reply used when nothing else matches.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Reply with `output` whenever the first message contains `needle`.
    pub fn with_response_mapping(
        mut self,
        needle: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .mapped_responses
            .insert(needle.into(), output.into());
        self
    }

    /// Queue replies consumed one per call.
    pub fn with_replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queued
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(Into::into));
        self
    }

    /// Fail every call with a service error.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_all = true;
        self
    }

    /// Fail calls whose first message contains `needle`.
    pub fn failing_when(mut self, needle: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fail_when.push(needle.into());
        self
    }

    /// Set simulated latency for all calls.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of calls made.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn first_content<'a>(&self, messages: &'a [ChatMessage]) -> &'a str {
        messages.first().map(|m| m.content.as_str()).unwrap_or("")
    }
}

impl Default for MockChatBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        self.call_log.lock().unwrap().push(MockCall {
            messages: messages.to_vec(),
            timestamp: std::time::Instant::now(),
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        let first = self.first_content(messages);
        if self.config.fail_all || self.config.fail_when.iter().any(|n| first.contains(n.as_str())) {
            return Err(Error::Service("Simulated failure for testing".to_string()));
        }

        if let Some((_, output)) = self
            .config
            .mapped_responses
            .iter()
            .find(|(needle, _)| first.contains(needle.as_str()))
        {
            return Ok(ChatMessage::assistant(output.clone()));
        }

        if let Some(reply) = self.queued.lock().unwrap().pop_front() {
            return Ok(ChatMessage::assistant(reply));
        }

        Ok(ChatMessage::assistant(self.config.default_response.clone()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.config.fail_all)
    }
}
