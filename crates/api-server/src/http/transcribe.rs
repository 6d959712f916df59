use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use shared::models::{TranscribeRequest, TranscribeResponse};

use super::AppState;
use super::errors::{ai_not_configured_response, bad_request_response};

// TODO: replace with a real speech-to-text call once a provider is chosen.
const TRANSCRIPTION_PLACEHOLDER: &str = "Speech transcription is being processed...";

pub(super) async fn transcribe_audio(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(payload)) = payload else {
        return bad_request_response("invalid_json", "Request body must be JSON");
    };

    if payload
        .audio
        .as_deref()
        .is_none_or(|audio| audio.trim().is_empty())
    {
        return bad_request_response("invalid_audio", "No audio data provided");
    }

    if state.llm.is_none() {
        return ai_not_configured_response();
    }

    Json(TranscribeResponse {
        text: TRANSCRIPTION_PLACEHOLDER.to_string(),
    })
    .into_response()
}
