//! RecallIO HTTP client.
//!
//! Typed wrapper over the RecallIO memory API. All wire types are private
//! to this module; callers see only [`MemoryRecord`] values with a
//! canonical `content` field. Older API deployments return the summarized
//! text in a `summary` field instead of `content`; normalization happens
//! here so the turn pipeline never sees the schema variance.

use crate::memory::client::{MemoryError, MemoryService};
use crate::types::{MemoryQuery, MemoryRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const WRITE_PATH: &str = "/api/memory/write";
const RECALL_PATH: &str = "/api/memory/recall";

/// Client for the RecallIO memory service.
///
/// Constructed once at startup and shared across turns; `reqwest::Client`
/// is an `Arc` internally so cloning is cheap.
#[derive(Debug, Clone)]
pub struct RecallioClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RecallioClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, MemoryError> {
        let client = Client::builder()
            .build()
            .map_err(|e| MemoryError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MemoryService for RecallioClient {
    async fn write(
        &self,
        user_id: &str,
        project_id: &str,
        content: &str,
    ) -> Result<(), MemoryError> {
        let payload = WriteRequest {
            user_id,
            project_id,
            content,
            // Only explicit user-originated content is ever written.
            consent_flag: true,
        };

        debug!(user_id, project_id, content_len = content.len(), "writing memory");

        let response = self
            .client
            .post(self.url(WRITE_PATH))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MemoryError::Request(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    async fn recall(&self, query: &MemoryQuery) -> Result<Vec<MemoryRecord>, MemoryError> {
        let payload = RecallRequest {
            project_id: &query.project_id,
            user_id: &query.user_id,
            query: &query.query_text,
            scope: match query.scope {
                crate::types::MemoryScope::User => "user",
            },
            summarized: query.summarized,
            similarity_threshold: query.similarity_threshold,
            limit: query.limit,
        };

        debug!(
            user_id = %query.user_id,
            project_id = %query.project_id,
            limit = ?query.limit,
            "recalling memory"
        );

        let response = self
            .client
            .post(self.url(RECALL_PATH))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MemoryError::Request(e.to_string()))?;

        let response = check_status(response).await?;

        let raw: Vec<RawRecord> = response
            .json()
            .await
            .map_err(|e| MemoryError::Request(format!("failed to parse recall response: {e}")))?;

        let records: Vec<MemoryRecord> = raw.into_iter().filter_map(normalize).collect();
        debug!(count = records.len(), "recall returned records");
        Ok(records)
    }
}

/// Consume the response, mapping non-success statuses to the error
/// taxonomy: service-declared refusals (4xx: rate limit, malformed scope)
/// become `Unavailable`, everything else `Request`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, MemoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => format!("HTTP {status}: {}", env.error),
        Err(_) => format!("HTTP {status}: {body}"),
    };

    warn!(%status, %message, "memory service returned HTTP error");

    if status.is_client_error() {
        Err(MemoryError::Unavailable(message))
    } else {
        Err(MemoryError::Request(message))
    }
}

/// Collapse the `content`/`summary` schema variance into one canonical
/// `content`. Records carrying neither field (or only blank text) are
/// dropped rather than surfaced as empty context.
fn normalize(raw: RawRecord) -> Option<MemoryRecord> {
    let content = raw
        .content
        .filter(|s| !s.trim().is_empty())
        .or(raw.summary.filter(|s| !s.trim().is_empty()))?;

    Some(MemoryRecord {
        content,
        created_at: raw.created_at,
    })
}

// ============= Wire Types =============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteRequest<'a> {
    user_id: &'a str,
    project_id: &'a str,
    content: &'a str,
    consent_flag: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecallRequest<'a> {
    project_id: &'a str,
    user_id: &'a str,
    query: &'a str,
    scope: &'a str,
    summarized: bool,
    similarity_threshold: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
}
