use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shared::models::MarsRoverPhotosResponse;
use shared::nasa::fallback::fallback_rover_photos;
use shared::nasa::{DEFAULT_CAMERA, DEFAULT_ROVER, normalize_camera, normalize_rover};
use tracing::warn;

use super::AppState;
use super::errors::{bad_request_response, nasa_error_response, nasa_not_configured_response};

#[derive(Debug, Deserialize)]
pub(super) struct MarsRoverQuery {
    rover: Option<String>,
    camera: Option<String>,
}

pub(super) async fn get_latest_photos(
    State(state): State<AppState>,
    Query(query): Query<MarsRoverQuery>,
) -> Response {
    let Some(nasa) = state.nasa.as_deref() else {
        return nasa_not_configured_response();
    };

    let rover_param = non_blank(query.rover.as_deref());
    let camera_param = non_blank(query.camera.as_deref());
    let explicit = rover_param.is_some() || camera_param.is_some();

    let rover = match rover_param {
        Some(raw) => match normalize_rover(raw) {
            Some(rover) => rover,
            None => {
                return bad_request_response(
                    "invalid_rover",
                    "rover must be one of curiosity, perseverance, opportunity, spirit",
                );
            }
        },
        None => DEFAULT_ROVER,
    };
    let camera = match camera_param {
        Some(raw) => match normalize_camera(raw) {
            Some(camera) => camera,
            None => {
                return bad_request_response(
                    "invalid_camera",
                    "camera must be a short alphanumeric camera id",
                );
            }
        },
        None => DEFAULT_CAMERA.to_string(),
    };

    match nasa.latest_rover_photos(rover, Some(camera.as_str())).await {
        Ok(photos) => Json(MarsRoverPhotosResponse::from_photos(photos)).into_response(),
        Err(err) if !explicit => {
            warn!(error = %err, "rover photos unavailable; serving fallback photos");
            Json(fallback_rover_photos()).into_response()
        }
        Err(err) => nasa_error_response("mars_rover_latest", &err),
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
