#![allow(dead_code)]

use std::collections::HashMap;

use api_server::http::{AppState, build_router};
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use shared::config::ApiConfig;
use tower::ServiceExt;

/// Upstream endpoints and credentials for one test router. A `None` key leaves
/// that provider unconfigured, as in production.
#[derive(Debug, Default, Clone)]
pub struct TestUpstreams {
    pub nasa_base_url: Option<String>,
    pub gemini_base_url: Option<String>,
    pub nasa_timeout_ms: Option<u64>,
}

impl TestUpstreams {
    pub fn nasa(base_url: &str) -> Self {
        Self {
            nasa_base_url: Some(base_url.to_string()),
            ..Self::default()
        }
    }

    pub fn gemini(base_url: &str) -> Self {
        Self {
            gemini_base_url: Some(base_url.to_string()),
            ..Self::default()
        }
    }

    pub fn both(nasa_base_url: &str, gemini_base_url: &str) -> Self {
        Self {
            nasa_base_url: Some(nasa_base_url.to_string()),
            gemini_base_url: Some(gemini_base_url.to_string()),
            ..Self::default()
        }
    }

    pub fn with_nasa_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.nasa_timeout_ms = Some(timeout_ms);
        self
    }
}

pub fn build_test_router(upstreams: TestUpstreams) -> axum::Router {
    let mut values = HashMap::from([
        ("ASSISTANT_NASA_TIMEOUT_MS".to_string(), "500".to_string()),
        (
            "CORS_ALLOWED_ORIGINS".to_string(),
            "http://localhost:3000".to_string(),
        ),
    ]);
    if let Some(base_url) = upstreams.nasa_base_url {
        values.insert("NASA_API_KEY".to_string(), "integration-nasa-key".to_string());
        values.insert("NASA_API_BASE_URL".to_string(), base_url);
    }
    if let Some(base_url) = upstreams.gemini_base_url {
        values.insert(
            "GEMINI_API_KEY".to_string(),
            "integration-gemini-key".to_string(),
        );
        values.insert("GEMINI_API_BASE_URL".to_string(), base_url);
    }
    values.insert(
        "NASA_TIMEOUT_MS".to_string(),
        upstreams.nasa_timeout_ms.unwrap_or(2_000).to_string(),
    );

    let config = ApiConfig::from_lookup(move |key: &str| values.get(key).cloned())
        .expect("test config should load");
    let state = AppState::from_config(&config).expect("test state should build");
    build_router(state)
}

pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send_json(app: &axum::Router, request: Request<Body>) -> JsonResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should read");
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));

    JsonResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn post_multipart(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    const BOUNDARY: &str = "astrobot-test-boundary";
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build")
}

pub fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}
