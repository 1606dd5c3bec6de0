//! Memory service clients.
//!
//! The memory service is a remote capability: this module only defines the
//! contract the turn pipeline relies on ([`MemoryService`]) and a typed
//! HTTP client for the RecallIO API ([`RecallioClient`]). Storage and
//! recall ranking are the service's business, not ours.

/// The `MemoryService` trait and its error type.
pub mod client;
/// RecallIO HTTP client implementation.
pub mod recallio;

pub use client::{MemoryError, MemoryService};
pub use recallio::RecallioClient;
