use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::assistant::AssistantRequest;
use shared::llm::InlineImage;
use shared::models::{AssistantJsonRequest, AssistantResponse, ChatMessage};

use super::AppState;
use super::errors::{bad_request_response, error_response};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

pub(super) async fn ask_astrobot(State(state): State<AppState>, request: Request) -> Response {
    let parsed = if is_multipart(request.headers()) {
        match Multipart::from_request(request, &state).await {
            Ok(multipart) => read_multipart(multipart).await,
            Err(rejection) => Err(rejection.into_response()),
        }
    } else {
        match Json::<AssistantJsonRequest>::from_request(request, &state).await {
            Ok(Json(body)) => Ok(AssistantRequest {
                message: body.message,
                image: None,
                history: body.conversation_history,
            }),
            Err(_) => Err(bad_request_response(
                "invalid_json",
                "Request body must be JSON or multipart form data",
            )),
        }
    };

    let question = match parsed {
        Ok(question) => question,
        Err(response) => return response,
    };

    let reply = state.assistant.route(question).await;
    Json(AssistantResponse::from(reply)).into_response()
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn read_multipart(mut multipart: Multipart) -> Result<AssistantRequest, Response> {
    let mut question = AssistantRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("message") => {
                question.message = field.text().await.map_err(multipart_error)?;
            }
            Some("conversationHistory") => {
                let raw = field.text().await.map_err(multipart_error)?;
                question.history = parse_history(&raw)?;
            }
            Some("image") => {
                let mime_type = image_mime_type(field.content_type());
                let bytes = field.bytes().await.map_err(multipart_error)?;
                if !bytes.is_empty() {
                    question.image = Some(InlineImage {
                        mime_type,
                        data_base64: STANDARD.encode(&bytes),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(question)
}

/// Uploads without an `image/*` type are sent on as JPEG.
fn image_mime_type(content_type: Option<&str>) -> String {
    match content_type {
        Some(mime) if mime.to_ascii_lowercase().starts_with("image/") => mime.to_string(),
        _ => DEFAULT_IMAGE_MIME.to_string(),
    }
}

fn parse_history(raw: &str) -> Result<Vec<ChatMessage>, Response> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|_| {
        bad_request_response(
            "invalid_history",
            "conversationHistory must be a JSON array of messages",
        )
    })
}

fn multipart_error(err: MultipartError) -> Response {
    error_response(err.status(), "invalid_multipart", &err.body_text())
}
