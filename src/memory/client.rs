use crate::types::{MemoryQuery, MemoryRecord};
use async_trait::async_trait;

/// Errors from the memory service boundary.
///
/// `Unavailable` is the distinguished, service-declared refusal (rate
/// limit, malformed scope). The turn pipeline treats it as "no memory
/// available" on recall rather than a turn-fatal condition; for writes
/// every variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("memory service unavailable: {0}")]
    Unavailable(String),

    #[error("memory request failed: {0}")]
    Request(String),
}

/// Contract the turn pipeline relies on for persisting and recalling
/// memory. Implemented by [`RecallioClient`](super::RecallioClient) in
/// production and by scripted mocks in tests.
#[async_trait]
pub trait MemoryService: Send + Sync {
    /// Durably record `content` under the given scope, tagged with
    /// consent = true (explicit user-originated content only).
    async fn write(&self, user_id: &str, project_id: &str, content: &str)
        -> Result<(), MemoryError>;

    /// Return records most relevant to the query text, best match first.
    /// May be empty.
    async fn recall(&self, query: &MemoryQuery) -> Result<Vec<MemoryRecord>, MemoryError>;
}
