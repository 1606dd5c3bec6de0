//! HTTP API handlers and routes.
//!
//! Thin axum adapter over the turn pipeline. Endpoints:
//!
//! - `POST /api/chat` — run one turn: body `{"message": "..."}`, reply
//!   `{"reply": "...", "warnings": [...]}`. Blank or missing messages are
//!   rejected with 400; fatal turn errors become 500 responses whose body
//!   names the failing stage (`write` / `generate`).
//! - `GET /api/health` — liveness probe.

/// Request and response handlers.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
