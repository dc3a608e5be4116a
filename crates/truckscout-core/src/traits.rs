//! Trait definitions for truckscout.

use async_trait::async_trait;

use crate::{ChatMessage, Result};

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for chat completion.
///
/// Implementations forward an ordered list of role-tagged messages and return
/// the single reply message. Failures and timeouts surface as
/// [`crate::Error::Service`]; implementations do not retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Complete a conversation.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;

    /// Check if the backend is available and responding.
    async fn health_check(&self) -> Result<bool>;
}
