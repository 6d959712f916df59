use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::assistant::AssistantRouter;
use shared::config::ApiConfig;
use shared::llm::{GeminiConfigError, GeminiGateway, LlmGateway};
use shared::nasa::{NasaClient, NasaClientConfig, NasaConfigError, NasaFeed};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

mod apod;
mod astrobot;
mod errors;
mod health;
mod mars_rover;
mod neo_tracker;
mod observability;
mod transcribe;
mod translate;

#[derive(Clone)]
pub struct AppState {
    /// `None` when no NASA key is configured.
    pub nasa: Option<Arc<dyn NasaFeed>>,
    /// `None` when no Gemini key is configured.
    pub llm: Option<Arc<dyn LlmGateway>>,
    pub assistant: AssistantRouter,
    pub max_upload_bytes: usize,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AppStateError {
    #[error(transparent)]
    Nasa(#[from] NasaConfigError),
    #[error(transparent)]
    Gemini(#[from] GeminiConfigError),
}

impl AppState {
    /// The assistant gets its own NASA client so its sub-queries use the
    /// shorter assistant timeout.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppStateError> {
        let nasa = nasa_feed(config.nasa.clone())?;
        let assistant_nasa = nasa_feed(
            config
                .nasa
                .clone()
                .with_timeout_ms(config.assistant_nasa_timeout_ms),
        )?;
        let llm = match &config.gemini {
            Some(gemini) => {
                Some(Arc::new(GeminiGateway::new(gemini.clone())?) as Arc<dyn LlmGateway>)
            }
            None => None,
        };

        Ok(Self {
            assistant: AssistantRouter::new(
                assistant_nasa,
                llm.clone(),
                config.assistant_history_limit,
            ),
            nasa,
            llm,
            max_upload_bytes: config.max_upload_bytes,
            cors_allowed_origins: config.cors_allowed_origins.clone(),
        })
    }
}

fn nasa_feed(config: NasaClientConfig) -> Result<Option<Arc<dyn NasaFeed>>, AppStateError> {
    match NasaClient::new(config) {
        Ok(client) => Ok(Some(Arc::new(client) as Arc<dyn NasaFeed>)),
        Err(NasaConfigError::MissingApiKey) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub fn build_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.cors_allowed_origins);
    let body_limit = DefaultBodyLimit::max(app_state.max_upload_bytes);

    let api_routes = Router::new()
        .route("/api/apod", get(apod::get_apod))
        .route("/api/astrobot", post(astrobot::ask_astrobot))
        .route("/api/mars-rover", get(mars_rover::get_latest_photos))
        .route("/api/neo-tracker", get(neo_tracker::get_neo_feed))
        .route("/api/translate", post(translate::translate_text))
        .route("/api/transcribe", post(transcribe::transcribe_audio))
        .layer(body_limit);

    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .merge(api_routes)
        .layer(middleware::from_fn(
            observability::request_observability_middleware,
        ))
        .layer(cors)
        .with_state(app_state)
}

/// A `*` entry allows every origin; otherwise only the listed origins are echoed.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::cors_layer;

    async fn allowed_origin_for(allowed: &[&str], origin: &str) -> Option<String> {
        let allowed = allowed.iter().map(|value| value.to_string()).collect::<Vec<_>>();
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(cors_layer(&allowed));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn wildcard_origin_allows_any_caller() {
        assert_eq!(
            allowed_origin_for(&["*"], "https://astro.example").await,
            Some("*".to_string())
        );
        assert_eq!(
            allowed_origin_for(&["http://localhost:3000", " * "], "https://astro.example").await,
            Some("*".to_string())
        );
    }

    #[tokio::test]
    async fn origin_list_only_echoes_listed_origins() {
        let allowed = ["http://localhost:3000"];
        assert_eq!(
            allowed_origin_for(&allowed, "http://localhost:3000").await,
            Some("http://localhost:3000".to_string())
        );
        assert_eq!(allowed_origin_for(&allowed, "https://evil.example").await, None);
    }
}
