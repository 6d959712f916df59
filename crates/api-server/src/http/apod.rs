use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::nasa::fallback::fallback_apod;
use shared::nasa::{apod_first_date, default_apod_date};
use tracing::warn;

use super::AppState;
use super::errors::{bad_request_response, nasa_error_response, nasa_not_configured_response};

#[derive(Debug, Deserialize)]
pub(super) struct ApodQuery {
    date: Option<String>,
}

pub(super) async fn get_apod(
    State(state): State<AppState>,
    Query(query): Query<ApodQuery>,
) -> Response {
    let Some(nasa) = state.nasa.as_deref() else {
        return nasa_not_configured_response();
    };

    let today = Utc::now().date_naive();
    let requested = match query
        .date
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
    {
        Some(raw) => match parse_apod_date(raw, today) {
            Some(date) => Some(date),
            None => {
                return bad_request_response(
                    "invalid_date",
                    "date must be YYYY-MM-DD between 1995-06-16 and today",
                );
            }
        },
        None => None,
    };

    match nasa.apod(requested.unwrap_or_else(|| default_apod_date(today))).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) if requested.is_none() => {
            warn!(error = %err, "apod unavailable; serving fallback entry");
            Json(fallback_apod()).into_response()
        }
        Err(err) => nasa_error_response("apod", &err),
    }
}

fn parse_apod_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (apod_first_date()..=today).contains(&date).then_some(date)
}
