//! # recall-chat
//!
//! A memory-augmented chat service: every user turn is persisted to a
//! remote memory service (RecallIO) and the completion prompt is grounded
//! in the most relevant recalled summary.
//!
//! ## Overview
//!
//! recall-chat can be used in two ways:
//!
//! 1. **As a standalone binary** - `recall-chat` serves the HTTP API,
//!    `recall-chat chat` runs an interactive terminal session
//! 2. **As a library** - drive the turn pipeline from your own code
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use recall_chat::{
//!     llm::OpenAIClient,
//!     memory::RecallioClient,
//!     orchestrator::Orchestrator,
//! };
//! use std::sync::Arc;
//!
//! let memory = Arc::new(RecallioClient::new(
//!     "https://app.recallio.ai".into(),
//!     "rio-...".into(),
//! )?);
//! let completion = Arc::new(OpenAIClient::new(
//!     "sk-...".into(),
//!     "https://api.openai.com/v1".into(),
//!     "gpt-3.5-turbo".into(),
//! ));
//!
//! let orchestrator = Orchestrator::new(memory, completion, Some(10));
//! let result = orchestrator.run_turn("I like tea", "user-1", "proj-1").await?;
//! println!("{}", result.reply);
//! ```
//!
//! ## Turn pipeline
//!
//! [`orchestrator::Orchestrator::run_turn`] drives the fixed sequence:
//! persist input → recall context → compose prompt → generate reply →
//! best-effort persist reply. See the module docs for the per-stage
//! failure policy.

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface and interactive session.
pub mod cli;
/// Completion service clients.
pub mod llm;
/// Memory service clients.
pub mod memory;
/// The conversation-turn pipeline.
pub mod orchestrator;
/// Shared request/response and domain types.
pub mod types;
/// Configuration utilities.
pub mod utils;

use crate::orchestrator::Orchestrator;
use crate::utils::config::Config;
use std::sync::Arc;

/// Shared application state for the HTTP layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<Orchestrator>,
}

pub use llm::{CompletionClient, CompletionError, OpenAIClient};
pub use memory::{MemoryError, MemoryService, RecallioClient};
pub use orchestrator::{TurnError, TurnResult, TurnWarning};
pub use types::{AppError, ChatMessage, MemoryQuery, MemoryRecord, MessageRole, Result};
