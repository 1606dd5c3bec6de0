use crate::types::ChatMessage;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion response contained no content")]
    EmptyResponse,
}

/// Contract for the language-model completion service: one synchronous
/// request/response per call, no retry, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a reply for an ordered sequence of role-tagged messages.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;

    /// The model identifier this client is configured for.
    fn model_name(&self) -> &str;
}
