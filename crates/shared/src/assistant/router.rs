use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::canned::{
    CHAT_EMPTY_ANSWER, VISION_APOLOGY, VISION_EMPTY_ANSWER, canned_reply, persona_reply,
};
use super::compose::{apod_summary, asteroid_summary, rover_summary};
use super::history::bound_history;
use super::intent::{NasaTopic, classify_topic, is_casual_message};
use crate::llm::{
    ASTROBOT_SYSTEM_PROMPT, DEFAULT_VISION_PROMPT, GenerationPurpose, InlineImage, LlmGateway,
    LlmGatewayRequest,
};
use crate::models::{ApiSource, AssistantResponse, ChatMessage};
use crate::nasa::{DEFAULT_ROVER, NasaError, NasaFeed, default_apod_date};

#[derive(Debug, Clone, Default)]
pub struct AssistantRequest {
    pub message: String,
    pub image: Option<InlineImage>,
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub source: ApiSource,
}

impl AssistantReply {
    fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ApiSource::Ai,
        }
    }

    fn nasa(text: String) -> Self {
        Self {
            text,
            source: ApiSource::Nasa,
        }
    }
}

impl From<AssistantReply> for AssistantResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            response: reply.text,
            api_source: reply.source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteStep {
    Vision,
    SmallTalk,
    NasaData,
    GenerativeChat,
}

impl RouteStep {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Vision => "vision",
            Self::SmallTalk => "small_talk",
            Self::NasaData => "nasa_data",
            Self::GenerativeChat => "generative_chat",
        }
    }
}

/// Tried in order until one step answers; the canned table answers the rest.
const ROUTE_ORDER: [RouteStep; 4] = [
    RouteStep::Vision,
    RouteStep::SmallTalk,
    RouteStep::NasaData,
    RouteStep::GenerativeChat,
];

enum StepOutcome {
    Answered(AssistantReply),
    Skipped,
    Failed(NasaError),
}

#[derive(Clone)]
pub struct AssistantRouter {
    nasa: Option<Arc<dyn NasaFeed>>,
    llm: Option<Arc<dyn LlmGateway>>,
    history_limit: usize,
}

impl AssistantRouter {
    pub fn new(
        nasa: Option<Arc<dyn NasaFeed>>,
        llm: Option<Arc<dyn LlmGateway>>,
        history_limit: usize,
    ) -> Self {
        Self {
            nasa,
            llm,
            history_limit,
        }
    }

    /// Always produces a user-facing answer; provider failures only move the
    /// request further down `ROUTE_ORDER`.
    pub async fn route(&self, request: AssistantRequest) -> AssistantReply {
        let AssistantRequest {
            message,
            image,
            history,
        } = request;
        let message = message.trim().to_string();
        let history = bound_history(history, self.history_limit);

        for step in ROUTE_ORDER {
            match self.attempt(step, &message, image.as_ref(), &history).await {
                StepOutcome::Answered(reply) => {
                    info!(
                        step = step.as_str(),
                        api_source = reply.source.as_str(),
                        "assistant request answered"
                    );
                    return reply;
                }
                StepOutcome::Skipped => {}
                StepOutcome::Failed(err) => {
                    warn!(
                        step = step.as_str(),
                        error = %err,
                        "assistant step failed; falling back"
                    );
                }
            }
        }

        info!(
            step = "canned_table",
            api_source = ApiSource::Ai.as_str(),
            "assistant request answered"
        );
        AssistantReply::ai(canned_reply(&message))
    }

    async fn attempt(
        &self,
        step: RouteStep,
        message: &str,
        image: Option<&InlineImage>,
        history: &[ChatMessage],
    ) -> StepOutcome {
        match step {
            RouteStep::Vision => match (image, self.llm.as_deref()) {
                (Some(image), Some(llm)) => {
                    StepOutcome::Answered(describe_image(llm, message, image.clone()).await)
                }
                _ => StepOutcome::Skipped,
            },
            RouteStep::SmallTalk => match self.llm.as_deref() {
                Some(llm) if is_casual_message(message) => {
                    StepOutcome::Answered(chat(llm, message, history).await)
                }
                _ => StepOutcome::Skipped,
            },
            RouteStep::NasaData => {
                let (Some(nasa), Some(topic)) = (self.nasa.as_deref(), classify_topic(message))
                else {
                    return StepOutcome::Skipped;
                };
                match answer_from_nasa(nasa, topic).await {
                    Ok(text) => StepOutcome::Answered(AssistantReply::nasa(text)),
                    Err(err) => StepOutcome::Failed(err),
                }
            }
            RouteStep::GenerativeChat => match self.llm.as_deref() {
                Some(llm) => StepOutcome::Answered(chat(llm, message, history).await),
                None => StepOutcome::Skipped,
            },
        }
    }
}

async fn describe_image(llm: &dyn LlmGateway, message: &str, image: InlineImage) -> AssistantReply {
    let prompt = if message.is_empty() {
        DEFAULT_VISION_PROMPT
    } else {
        message
    };
    let request = LlmGatewayRequest::new(GenerationPurpose::Vision, prompt).with_image(image);

    match llm.generate(request).await {
        Ok(response) => AssistantReply::ai(response.text_or(VISION_EMPTY_ANSWER)),
        Err(_) => AssistantReply::ai(VISION_APOLOGY),
    }
}

async fn chat(llm: &dyn LlmGateway, message: &str, history: &[ChatMessage]) -> AssistantReply {
    let request = LlmGatewayRequest::new(GenerationPurpose::Chat, message)
        .with_system_prompt(ASTROBOT_SYSTEM_PROMPT)
        .with_history(history.to_vec());

    match llm.generate(request).await {
        Ok(response) => AssistantReply::ai(response.text_or(CHAT_EMPTY_ANSWER)),
        Err(_) => AssistantReply::ai(persona_reply(message)),
    }
}

async fn answer_from_nasa(nasa: &dyn NasaFeed, topic: NasaTopic) -> Result<String, NasaError> {
    match topic {
        NasaTopic::Asteroids => {
            let page = nasa.neo_browse().await?;
            Ok(asteroid_summary(&page))
        }
        NasaTopic::MarsRover => {
            let photos = nasa.latest_rover_photos(DEFAULT_ROVER, None).await?;
            Ok(rover_summary(&photos))
        }
        NasaTopic::PictureOfTheDay => {
            let entry = nasa.apod(default_apod_date(Utc::now().date_naive())).await?;
            Ok(apod_summary(&entry))
        }
    }
}
