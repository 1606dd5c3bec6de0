use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Non-fatal degradations that occurred while producing the reply
    /// (recall fell back to empty context, reply persistence failed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

// ============= Prompt Types =============

/// A single role-tagged message in a completion prompt.
///
/// A turn's prompt is at most one leading system message (the recalled
/// summary injection) followed by exactly one user message. No multi-turn
/// history is kept here; cross-turn continuity comes from memory recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= Memory Types =============

/// A memory record returned by the memory service, normalized to a single
/// canonical `content` field at the client boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partitioning key family under which memory is written and queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    User,
}

/// A recall query against the memory service.
///
/// Use [`MemoryQuery::user_scoped`] to build one at the fixed operating
/// point (user scope, summarized, 0.5 similarity threshold).
#[derive(Debug, Clone, Serialize)]
pub struct MemoryQuery {
    pub project_id: String,
    pub user_id: String,
    pub query_text: String,
    pub scope: MemoryScope,
    pub summarized: bool,
    pub similarity_threshold: f32,
    pub limit: Option<u32>,
}

impl MemoryQuery {
    pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

    /// Build a summarized, user-scoped query at the default similarity
    /// threshold. A `limit` of zero is treated as unset.
    pub fn user_scoped(
        project_id: impl Into<String>,
        user_id: impl Into<String>,
        query_text: impl Into<String>,
        limit: Option<u32>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            user_id: user_id.into(),
            query_text: query_text.into(),
            scope: MemoryScope::User,
            summarized: true,
            similarity_threshold: Self::DEFAULT_SIMILARITY_THRESHOLD,
            limit: limit.filter(|&n| n > 0),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Persisting the user's input failed; the turn was aborted.
    #[error("memory write failed: {0}")]
    WriteFailed(String),

    /// The completion request failed; the turn was aborted.
    #[error("completion failed: {0}")]
    GenerationFailed(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Name of the pipeline stage this error belongs to, surfaced in HTTP
    /// error bodies so callers can tell which call failed.
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::WriteFailed(_) => "write",
            AppError::GenerationFailed(_) => "generate",
            AppError::InvalidInput(_) => "input",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "stage": self.stage(),
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
