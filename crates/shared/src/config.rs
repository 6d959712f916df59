use std::env;

use thiserror::Error;

use crate::config_env::{
    EnvLookup, optional_trimmed_env, parse_base_url_env, parse_list_env, parse_u64_env,
    parse_usize_env,
};
use crate::llm::GeminiGatewayConfig;
use crate::nasa::NasaClientConfig;

const DEFAULT_NASA_API_BASE_URL: &str = "https://api.nasa.gov";
const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_CHAT_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_GEMINI_TRANSLATE_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_NASA_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_ASSISTANT_NASA_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_HISTORY_LIMIT: usize = 20;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub nasa: NasaClientConfig,
    pub assistant_nasa_timeout_ms: u64,
    /// `None` when `GEMINI_API_KEY` is absent; AI-backed features degrade.
    pub gemini: Option<GeminiGatewayConfig>,
    pub assistant_history_limit: usize,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key: &str| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = &lookup;
        let nasa = NasaClientConfig {
            base_url: parse_base_url_env(env, "NASA_API_BASE_URL", DEFAULT_NASA_API_BASE_URL)?,
            api_key: optional_trimmed_env(env, "NASA_API_KEY"),
            timeout_ms: parse_u64_env(env, "NASA_TIMEOUT_MS", DEFAULT_NASA_TIMEOUT_MS)?,
        };

        Ok(Self {
            bind_addr: optional_trimmed_env(env, "API_BIND_ADDR")
                .unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            nasa,
            assistant_nasa_timeout_ms: parse_u64_env(
                env,
                "ASSISTANT_NASA_TIMEOUT_MS",
                DEFAULT_ASSISTANT_NASA_TIMEOUT_MS,
            )?,
            gemini: parse_gemini_config(env)?,
            assistant_history_limit: parse_usize_env(
                env,
                "ASSISTANT_HISTORY_LIMIT",
                DEFAULT_HISTORY_LIMIT,
            )?,
            max_upload_bytes: parse_usize_env(env, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            cors_allowed_origins: parse_list_env(
                env,
                "CORS_ALLOWED_ORIGINS",
                &["http://localhost:3000"],
            ),
        })
    }

    pub fn nasa_configured(&self) -> bool {
        self.nasa.api_key.is_some()
    }

    pub fn ai_configured(&self) -> bool {
        self.gemini.is_some()
    }
}

fn parse_gemini_config(env: &impl EnvLookup) -> Result<Option<GeminiGatewayConfig>, ConfigError> {
    let Some(api_key) = optional_trimmed_env(env, "GEMINI_API_KEY") else {
        return Ok(None);
    };

    Ok(Some(GeminiGatewayConfig {
        base_url: parse_base_url_env(env, "GEMINI_API_BASE_URL", DEFAULT_GEMINI_API_BASE_URL)?,
        api_key,
        chat_model: optional_trimmed_env(env, "GEMINI_CHAT_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_CHAT_MODEL.to_string()),
        translate_model: optional_trimmed_env(env, "GEMINI_TRANSLATE_MODEL")
            .unwrap_or_else(|| DEFAULT_GEMINI_TRANSLATE_MODEL.to_string()),
    }))
}

/// Loads `.env` from the working directory if one exists.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}
