//! API request handlers.

/// Chat turn handler.
pub mod chat;
/// Health check handler.
pub mod health;
