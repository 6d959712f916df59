use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::gateway::{
    GenerationPurpose, LlmGateway, LlmGatewayError, LlmGatewayFuture, LlmGatewayRequest,
    LlmGatewayResponse,
};
use crate::models::{ChatMessage, ChatRole};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiGatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub translate_model: String,
}

#[derive(Debug, Error)]
pub enum GeminiConfigError {
    #[error("failed to build Gemini http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GenerationSettings {
    temperature: f32,
    max_output_tokens: u32,
    top_p: Option<f32>,
    top_k: Option<u32>,
    timeout_ms: u64,
}

fn settings_for(purpose: GenerationPurpose) -> GenerationSettings {
    match purpose {
        GenerationPurpose::Chat => GenerationSettings {
            temperature: 0.9,
            max_output_tokens: 800,
            top_p: Some(0.95),
            top_k: Some(40),
            timeout_ms: 8_000,
        },
        GenerationPurpose::Vision => GenerationSettings {
            temperature: 0.7,
            max_output_tokens: 1_000,
            top_p: None,
            top_k: None,
            timeout_ms: 10_000,
        },
        GenerationPurpose::Translation => GenerationSettings {
            temperature: 0.3,
            max_output_tokens: 2_000,
            top_p: Some(0.95),
            top_k: None,
            timeout_ms: 15_000,
        },
    }
}

#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiGatewayConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiGatewayConfig) -> Result<Self, GeminiConfigError> {
        // Per-request timeouts are applied in `send_once`; purposes differ.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| GeminiConfigError::HttpClient(err.to_string()))?;

        Ok(Self { client, config })
    }

    fn model_for(&self, purpose: GenerationPurpose) -> &str {
        match purpose {
            GenerationPurpose::Chat | GenerationPurpose::Vision => &self.config.chat_model,
            GenerationPurpose::Translation => &self.config.translate_model,
        }
    }

    async fn send_once(
        &self,
        request: &LlmGatewayRequest,
    ) -> Result<LlmGatewayResponse, LlmGatewayError> {
        let model = self.model_for(request.purpose).to_string();
        let settings = settings_for(request.purpose);
        let url = format!(
            "{}/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .json(&build_request_body(request, settings))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmGatewayError::Timeout
                } else {
                    LlmGatewayError::ProviderFailure("request_unavailable".to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            if err.is_timeout() {
                LlmGatewayError::Timeout
            } else {
                LlmGatewayError::InvalidProviderPayload("response_body_read_failed".to_string())
            }
        })?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmGatewayError::RateLimited);
        }

        if !status.is_success() {
            return Err(LlmGatewayError::ProviderFailure(format!(
                "status={} code={}",
                status.as_u16(),
                parse_provider_error_code(&body)
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|_| {
            LlmGatewayError::InvalidProviderPayload("response_json_parse_failed".to_string())
        })?;

        let text = parsed.first_text();
        Ok(LlmGatewayResponse {
            model: parsed.model_version.unwrap_or(model),
            text,
        })
    }
}

impl LlmGateway for GeminiGateway {
    fn generate<'a>(&'a self, request: LlmGatewayRequest) -> LlmGatewayFuture<'a> {
        Box::pin(async move {
            let result = self.send_once(&request).await;
            if let Err(err) = &result {
                warn!(
                    purpose = request.purpose.as_str(),
                    error = %err,
                    "gemini generation failed"
                );
            }
            result
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

fn build_request_body(
    request: &LlmGatewayRequest,
    settings: GenerationSettings,
) -> GenerateContentRequest {
    let mut contents = history_contents(&request.history);

    let mut parts = vec![Part::Text {
        text: request.prompt.clone(),
    }];
    if let Some(image) = &request.image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data_base64.clone(),
            },
        });
    }
    push_turn(&mut contents, "user", parts);

    GenerateContentRequest {
        system_instruction: request.system_prompt.as_ref().map(|prompt| Content {
            role: None,
            parts: vec![Part::Text {
                text: prompt.clone(),
            }],
        }),
        contents,
        generation_config: GenerationConfig {
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
            top_p: settings.top_p,
            top_k: settings.top_k,
        },
    }
}

/// Gemini expects the conversation to open with a user turn and alternate
/// roles, so leading model turns are dropped and consecutive turns from the
/// same role are merged.
fn history_contents(history: &[ChatMessage]) -> Vec<Content> {
    let mut contents = Vec::new();
    for message in history {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        };
        if contents.is_empty() && role == "model" {
            continue;
        }
        push_turn(
            &mut contents,
            role,
            vec![Part::Text {
                text: message.content.clone(),
            }],
        );
    }
    contents
}

fn push_turn(contents: &mut Vec<Content>, role: &'static str, parts: Vec<Part>) {
    match contents.last_mut() {
        Some(last) if last.role == Some(role) => last.parts.extend(parts),
        _ => contents.push(Content {
            role: Some(role),
            parts,
        }),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    model_version: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.text.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn parse_provider_error_code(body: &str) -> String {
    #[derive(Deserialize)]
    struct ProviderErrorEnvelope {
        error: Option<ProviderErrorDetails>,
    }

    #[derive(Deserialize)]
    struct ProviderErrorDetails {
        status: Option<Value>,
    }

    let parsed = serde_json::from_str::<ProviderErrorEnvelope>(body).ok();
    let Some(provider_error_status) = parsed
        .and_then(|envelope| envelope.error)
        .and_then(|details| details.status)
    else {
        return "unknown".to_string();
    };

    match provider_error_status {
        Value::String(code) => code,
        Value::Number(code) => code.to_string(),
        _ => "unknown".to_string(),
    }
}
