use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::ErrorResponse;
use shared::nasa::NasaError;
use tracing::warn;

pub(super) fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(ErrorResponse::with_code(code, message))).into_response()
}

pub(super) fn bad_request_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, code, message)
}

/// NASA routes cannot serve anything useful without a key, so this is never
/// masked by fallback data.
pub(super) fn nasa_not_configured_response() -> Response {
    bad_request_response("config_missing", "NASA API key not configured")
}

pub(super) fn ai_not_configured_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "config_missing",
        "Gemini API key not configured",
    )
}

pub(super) fn rate_limited_response(message: &str) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::rate_limited(message)),
    )
        .into_response()
}

/// Maps a failed NASA call for an explicitly requested resource.
pub(super) fn nasa_error_response(operation: &'static str, err: &NasaError) -> Response {
    warn!(operation, error = %err, "nasa request failed for explicit parameters");

    if err.is_timeout() {
        return error_response(
            StatusCode::GATEWAY_TIMEOUT,
            "upstream_timeout",
            "NASA API did not respond in time",
        );
    }
    if err.is_not_found() {
        return error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            "NASA has no data for the requested parameters",
        );
    }

    error_response(
        StatusCode::BAD_GATEWAY,
        "upstream_error",
        "Failed to fetch data from NASA",
    )
}
