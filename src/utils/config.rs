use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAIConfig,
    pub recallio: RecallioConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecallioConfig {
    pub api_key: String,
    pub api_base: String,
    pub project_id: String,
    pub user_id: String,
    /// Maximum records to request per recall. Zero disables the limit.
    pub recall_limit: u32,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// Fails fast with the name of any missing required credential, so a
    /// misconfigured deployment never reaches the serving loop.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("invalid PORT: {e}")))?,
            },
            openai: OpenAIConfig {
                api_key: required("OPENAI_API_KEY")?,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            },
            recallio: RecallioConfig {
                api_key: required("RECALLIO_API_KEY")?,
                api_base: env::var("RECALLIO_API_BASE")
                    .unwrap_or_else(|_| "https://app.recallio.ai".to_string()),
                project_id: required("RECALLIO_PROJECT_ID")?,
                user_id: env::var("RECALLIO_USER_ID")
                    .unwrap_or_else(|_| "default_user".to_string()),
                recall_limit: env::var("RECALLIO_RECALL_LIMIT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("invalid RECALLIO_RECALL_LIMIT: {e}")))?,
            },
        })
    }

    /// Recall limit as the orchestrator expects it: `None` when disabled.
    pub fn recall_limit(&self) -> Option<u32> {
        (self.recallio.recall_limit > 0).then_some(self.recallio.recall_limit)
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("{key} is missing")))
}
