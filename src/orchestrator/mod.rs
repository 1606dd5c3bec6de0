//! The conversation-turn pipeline.
//!
//! One call to [`Orchestrator::run_turn`] drives a full turn in fixed
//! order: persist the user's input, recall relevant prior memory, compose
//! the augmented prompt, request a completion, and best-effort persist the
//! reply. The four network operations run strictly sequentially; turns for
//! different users are independent and share no mutable state.
//!
//! Failure policy is graded per stage:
//! - input write failure aborts the turn ([`TurnError::WriteFailed`]) —
//!   no reply is generated for an utterance that could not be recorded;
//! - recall failure (or an empty result) degrades to empty context and the
//!   turn continues;
//! - completion failure aborts the turn ([`TurnError::GenerationFailed`]);
//! - reply write failure is reported as a warning on an otherwise
//!   successful result, never hiding a reply already produced.
//!
//! No call is retried; every failure is reported or degraded exactly once.

use crate::llm::{CompletionClient, CompletionError};
use crate::memory::{MemoryError, MemoryService};
use crate::types::{AppError, ChatMessage, MemoryQuery};
use std::sync::Arc;
use tracing::{info, warn};

/// System-message prefix carrying the recalled summary into the prompt.
const RECALLED_SUMMARY_PREFIX: &str = "Recalled Summary: ";

/// A successful turn: the reply plus any non-fatal degradations that
/// occurred on the way.
#[derive(Debug)]
pub struct TurnResult {
    pub reply: String,
    pub warnings: Vec<TurnWarning>,
    /// The summary injected into the prompt, empty when recall produced
    /// nothing. Surfaced so front-ends can display the recalled context.
    pub recalled_summary: String,
}

/// Non-fatal degradations attached to a successful turn.
#[derive(Debug, thiserror::Error)]
pub enum TurnWarning {
    #[error("memory recall degraded to empty context: {0}")]
    RecallDegraded(#[source] MemoryError),

    #[error("assistant reply could not be persisted: {0}")]
    ReplyWriteFailed(#[source] MemoryError),
}

/// The two turn-fatal outcomes.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("memory write failed: {0}")]
    WriteFailed(#[source] MemoryError),

    #[error("completion failed: {0}")]
    GenerationFailed(#[source] CompletionError),
}

impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::WriteFailed(e) => AppError::WriteFailed(e.to_string()),
            TurnError::GenerationFailed(e) => AppError::GenerationFailed(e.to_string()),
        }
    }
}

/// Drives the turn pipeline against injected service clients.
///
/// Both clients are immutable shared handles constructed once at startup;
/// injecting them here (rather than reaching for globals) is what lets the
/// pipeline run against test doubles.
pub struct Orchestrator {
    memory: Arc<dyn MemoryService>,
    completion: Arc<dyn CompletionClient>,
    recall_limit: Option<u32>,
}

impl Orchestrator {
    pub fn new(
        memory: Arc<dyn MemoryService>,
        completion: Arc<dyn CompletionClient>,
        recall_limit: Option<u32>,
    ) -> Self {
        Self {
            memory,
            completion,
            recall_limit,
        }
    }

    /// Run one conversation turn.
    ///
    /// `user_text` must be non-empty after trimming; front-ends reject or
    /// ignore blank input before calling.
    pub async fn run_turn(
        &self,
        user_text: &str,
        user_id: &str,
        project_id: &str,
    ) -> Result<TurnResult, TurnError> {
        debug_assert!(!user_text.trim().is_empty());
        let mut warnings = Vec::new();

        // 1. Persist the input. Writing before recall keeps the current
        // utterance recallable in later turns; recall within this turn
        // does not depend on it.
        self.memory
            .write(user_id, project_id, user_text)
            .await
            .map_err(TurnError::WriteFailed)?;

        // 2. Recall context. Any failure, including a service-declared
        // Unavailable, degrades to an empty summary.
        let query = MemoryQuery::user_scoped(project_id, user_id, user_text, self.recall_limit);
        let recalled_summary = match self.memory.recall(&query).await {
            Ok(records) => records
                .into_iter()
                .next()
                .map(|r| r.content)
                .unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "memory recall failed, continuing without context");
                warnings.push(TurnWarning::RecallDegraded(e));
                String::new()
            }
        };

        // 3. Compose the prompt.
        let messages = compose_prompt(&recalled_summary, user_text);

        // 4. Generate the reply. The one call with no fallback.
        let reply = self
            .completion
            .generate(&messages)
            .await
            .map_err(TurnError::GenerationFailed)?;

        // 5. Persist the reply, best-effort.
        if let Err(e) = self.memory.write(user_id, project_id, &reply).await {
            warn!(error = %e, "failed to persist assistant reply");
            warnings.push(TurnWarning::ReplyWriteFailed(e));
        }

        info!(
            user_id,
            project_id,
            recalled = !recalled_summary.is_empty(),
            warnings = warnings.len(),
            "turn completed"
        );

        Ok(TurnResult {
            reply,
            warnings,
            recalled_summary,
        })
    }
}

/// Build the turn's prompt: an optional leading system message carrying
/// the recalled summary, then the user message.
fn compose_prompt(recalled_summary: &str, user_text: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !recalled_summary.is_empty() {
        messages.push(ChatMessage::system(format!(
            "{RECALLED_SUMMARY_PREFIX}{recalled_summary}"
        )));
    }
    messages.push(ChatMessage::user(user_text));
    messages
}
