//! Completion service clients.
//!
//! One trait, one backend: [`CompletionClient`] is the seam the turn
//! pipeline (and tests) depend on, [`OpenAIClient`] is the production
//! implementation against the OpenAI chat completions API. Model and
//! generation parameters are fixed configuration, not request-level.

/// The `CompletionClient` trait and its error type.
pub mod client;
/// OpenAI chat completions implementation.
pub mod openai;

pub use client::{CompletionClient, CompletionError};
pub use openai::OpenAIClient;
