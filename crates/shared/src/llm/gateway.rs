use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::models::ChatMessage;

pub type LlmGatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<LlmGatewayResponse, LlmGatewayError>> + Send + 'a>>;

/// Selects model, sampling settings and timeout for a generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPurpose {
    Chat,
    Vision,
    Translation,
}

impl GenerationPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Vision => "vision",
            Self::Translation => "translation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone)]
pub struct LlmGatewayRequest {
    pub purpose: GenerationPurpose,
    pub system_prompt: Option<String>,
    pub history: Vec<ChatMessage>,
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl LlmGatewayRequest {
    pub fn new(purpose: GenerationPurpose, prompt: impl Into<String>) -> Self {
        Self {
            purpose,
            system_prompt: None,
            history: Vec::new(),
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

#[derive(Debug, Clone)]
pub struct LlmGatewayResponse {
    pub model: String,
    /// First candidate's text; `None` when the provider returned no usable text.
    pub text: Option<String>,
}

impl LlmGatewayResponse {
    pub fn text_or(self, default: &str) -> String {
        self.text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

#[derive(Debug, Error)]
pub enum LlmGatewayError {
    #[error("llm provider request timed out")]
    Timeout,
    #[error("llm provider rate limited the request")]
    RateLimited,
    #[error("llm provider request failed: {0}")]
    ProviderFailure(String),
    #[error("llm provider returned an invalid payload: {0}")]
    InvalidProviderPayload(String),
}

pub trait LlmGateway: Send + Sync {
    fn generate<'a>(&'a self, request: LlmGatewayRequest) -> LlmGatewayFuture<'a>;
}
