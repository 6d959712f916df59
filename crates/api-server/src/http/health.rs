use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shared::models::{OkResponse, ReadinessResponse};

use super::AppState;

pub(super) async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(OkResponse { ok: true }))
}

/// Missing credentials degrade features rather than failing readiness.
pub(super) async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ReadinessResponse {
            ok: true,
            nasa_configured: state.nasa.is_some(),
            ai_configured: state.llm.is_some(),
        }),
    )
}
