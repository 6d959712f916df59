use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ok: bool,
    pub nasa_configured: bool,
    pub ai_configured: bool,
}

/// Flat error body the browser UI reads (`data.error`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    /// Stable machine-readable reason, e.g. `invalid_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_rate_limit: Option<bool>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: None,
            is_rate_limit: None,
        }
    }

    pub fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: Some(code.to_string()),
            is_rate_limit: None,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: Some("rate_limited".to_string()),
            is_rate_limit: Some(true),
        }
    }
}

// ---- APOD ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodEntry {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

// ---- Mars rover photos ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsPhoto {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol: Option<u64>,
    pub img_src: String,
    pub earth_date: String,
    pub camera: MarsCamera,
    pub rover: MarsRover,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsCamera {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsRover {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsRoverPhotosResponse {
    pub photos: Vec<MarsPhoto>,
    pub total_photos: usize,
}

impl MarsRoverPhotosResponse {
    pub fn from_photos(photos: Vec<MarsPhoto>) -> Self {
        Self {
            total_photos: photos.len(),
            photos,
        }
    }
}

// ---- Near-Earth objects ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasa_jpl_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<f64>,
    /// Kept as raw JSON; the UI reads several unit groupings from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter: Option<Value>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoPage {
    pub total_elements: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoTrackerResponse {
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
    pub page: NeoPage,
}

// ---- Assistant ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSource {
    Nasa,
    #[serde(alias = "gemini")]
    Ai,
}

impl ApiSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nasa => "nasa",
            Self::Ai => "ai",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_source: Option<ApiSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantJsonRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantResponse {
    pub response: String,
    pub api_source: ApiSource,
}

// ---- Translate / transcribe ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    Nepali,
    Hindi,
}

impl TargetLanguage {
    /// Anything other than `nepali` translates to Hindi.
    pub fn from_request(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "nepali" => Self::Nepali,
            _ => Self::Hindi,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nepali => "Nepali (नेपाली)",
            Self::Hindi => "Hindi (हिन्दी)",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscribeRequest {
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub text: String,
}
