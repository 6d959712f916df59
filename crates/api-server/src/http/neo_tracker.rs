use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use shared::models::{NeoPage, NeoTrackerResponse};
use shared::nasa::NeoWindow;
use shared::nasa::fallback::fallback_neo_feed;
use tracing::warn;

use super::AppState;
use super::errors::nasa_not_configured_response;

/// The window depends only on the current UTC date, so repeated calls on one
/// day ask NASA for the same feed.
pub(super) async fn get_neo_feed(State(state): State<AppState>) -> Response {
    let Some(nasa) = state.nasa.as_deref() else {
        return nasa_not_configured_response();
    };

    let window = NeoWindow::ending_on(Utc::now().date_naive());
    match nasa.neo_feed(window).await {
        Ok(feed) => Json(NeoTrackerResponse {
            near_earth_objects: feed.near_earth_objects,
            page: NeoPage {
                total_elements: feed.element_count,
            },
        })
        .into_response(),
        Err(err) => {
            warn!(error = %err, "neo feed unavailable; serving fallback feed");
            Json(fallback_neo_feed()).into_response()
        }
    }
}
