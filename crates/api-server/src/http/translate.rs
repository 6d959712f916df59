use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::llm::{GenerationPurpose, LlmGatewayError, LlmGatewayRequest, translation_prompt};
use shared::models::{TargetLanguage, TranslateRequest, TranslateResponse};
use tracing::warn;

use super::AppState;
use super::errors::{
    ai_not_configured_response, bad_request_response, error_response, rate_limited_response,
};

const RATE_LIMIT_MESSAGE: &str =
    "Translation temporarily unavailable due to rate limits. Please try again in a minute.";

pub(super) async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Response {
    let Some(llm) = state.llm.as_deref() else {
        return ai_not_configured_response();
    };
    let Ok(Json(payload)) = payload else {
        return bad_request_response("invalid_json", "Request body must be JSON");
    };

    let text = payload.text.trim();
    if text.is_empty() {
        return bad_request_response("invalid_text", "text is required");
    }

    let language = TargetLanguage::from_request(payload.language.as_deref());
    let request = LlmGatewayRequest::new(
        GenerationPurpose::Translation,
        translation_prompt(language, text),
    );

    match llm.generate(request).await {
        Ok(response) => Json(TranslateResponse {
            translated_text: response.text_or(text),
        })
        .into_response(),
        Err(LlmGatewayError::RateLimited) => rate_limited_response(RATE_LIMIT_MESSAGE),
        Err(err) => {
            warn!(error = %err, "translation failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "translation_failed",
                "Translation failed. Please try again later.",
            )
        }
    }
}
