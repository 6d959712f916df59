#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

pub struct MockUpstreamServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl MockUpstreamServer {
    pub async fn start(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock upstream listener should bind");
        let bind_addr = listener
            .local_addr()
            .expect("mock upstream listener local address should exist");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock upstream server should run");
        });

        Self {
            base_url: format!("http://{bind_addr}"),
            handle,
        }
    }
}

impl Drop for MockUpstreamServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug, Clone, Copy)]
pub enum UpstreamMode {
    Healthy,
    Status(StatusCode),
    Slow(Duration),
}

/// Records every NASA path hit so tests can assert on upstream traffic.
#[derive(Debug, Clone)]
pub struct MockNasa {
    mode: UpstreamMode,
    pub requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

impl MockNasa {
    pub fn new(mode: UpstreamMode) -> Self {
        Self {
            mode,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn start(&self) -> MockUpstreamServer {
        let app = Router::new()
            .route("/planetary/apod", get(apod_handler))
            .route(
                "/mars-photos/api/v1/rovers/{rover}/latest_photos",
                get(latest_photos_handler),
            )
            .route("/neo/rest/v1/feed", get(neo_feed_handler))
            .route("/neo/rest/v1/neo/browse", get(neo_browse_handler))
            .with_state(self.clone());
        MockUpstreamServer::start(app).await
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn respond(
        &self,
        label: String,
        query: HashMap<String, String>,
        body: Value,
    ) -> (StatusCode, Json<Value>) {
        self.requests.lock().await.push((label, query));
        match self.mode {
            UpstreamMode::Healthy => (StatusCode::OK, Json(body)),
            UpstreamMode::Status(status) => (status, Json(json!({ "msg": "mock failure" }))),
            UpstreamMode::Slow(delay) => {
                tokio::time::sleep(delay).await;
                (StatusCode::OK, Json(body))
            }
        }
    }
}

async fn apod_handler(
    State(mock): State<MockNasa>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let date = query.get("date").cloned().unwrap_or_default();
    mock.respond(
        "apod".to_string(),
        query,
        json!({
            "date": date,
            "title": "Live Mock Galaxy",
            "explanation": "A galaxy served by the mock NASA upstream.",
            "url": "https://apod.nasa.gov/apod/image/live.jpg",
            "media_type": "image",
            "service_version": "v1"
        }),
    )
    .await
}

async fn latest_photos_handler(
    State(mock): State<MockNasa>,
    Path(rover): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let camera = query
        .get("camera")
        .cloned()
        .unwrap_or_else(|| "FHAZ".to_string());
    mock.respond(
        format!("rover:{rover}"),
        query,
        json!({
            "latest_photos": [
                {
                    "id": 900_001,
                    "sol": 4_100,
                    "img_src": "https://mars.nasa.gov/live-1.jpg",
                    "earth_date": "2026-10-17",
                    "camera": { "name": camera, "full_name": "Mock Camera" },
                    "rover": { "name": rover, "status": "active" }
                },
                {
                    "id": 900_002,
                    "sol": 4_100,
                    "img_src": "https://mars.nasa.gov/live-2.jpg",
                    "earth_date": "2026-10-17",
                    "camera": { "name": camera, "full_name": "Mock Camera" },
                    "rover": { "name": rover, "status": "active" }
                }
            ]
        }),
    )
    .await
}

async fn neo_feed_handler(
    State(mock): State<MockNasa>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let end_date = query.get("end_date").cloned().unwrap_or_default();
    let mut buckets = Map::new();
    buckets.insert(
        end_date,
        json!([
            { "id": "1", "name": "(2026 TA)", "is_potentially_hazardous_asteroid": false },
            { "id": "2", "name": "(2026 TB)", "is_potentially_hazardous_asteroid": true },
            { "id": "3", "name": "(2026 TC)", "is_potentially_hazardous_asteroid": false }
        ]),
    );
    mock.respond(
        "neo_feed".to_string(),
        query,
        json!({
            "element_count": 3,
            "near_earth_objects": buckets
        }),
    )
    .await
}

async fn neo_browse_handler(
    State(mock): State<MockNasa>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    mock.respond(
        "neo_browse".to_string(),
        query,
        json!({
            "page": { "size": 20, "total_elements": 41_287, "total_pages": 2_065, "number": 0 },
            "near_earth_objects": [
                { "id": "2000433", "name": "433 Eros (A898 PA)", "is_potentially_hazardous_asteroid": false },
                { "id": "2099942", "name": "99942 Apophis (2004 MN4)", "is_potentially_hazardous_asteroid": true },
                { "id": "2001566", "name": "1566 Icarus (1949 MA)", "is_potentially_hazardous_asteroid": true }
            ]
        }),
    )
    .await
}

#[derive(Debug, Clone)]
pub enum GeminiMode {
    Reply(String),
    Empty,
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct MockGemini {
    mode: GeminiMode,
    pub calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockGemini {
    pub fn replying(text: &str) -> Self {
        Self::new(GeminiMode::Reply(text.to_string()))
    }

    pub fn new(mode: GeminiMode) -> Self {
        Self {
            mode,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Base URL to configure as `GEMINI_API_BASE_URL` for a started server.
    pub fn api_base(server: &MockUpstreamServer) -> String {
        format!("{}/v1beta", server.base_url)
    }

    pub async fn start(&self) -> MockUpstreamServer {
        let app = Router::new()
            .route("/v1beta/models/{action}", post(generate_content_handler))
            .with_state(self.clone());
        MockUpstreamServer::start(app).await
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

async fn generate_content_handler(
    State(mock): State<MockGemini>,
    Path(action): Path<String>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.calls.lock().await.push((action, payload));

    match &mock.mode {
        GeminiMode::Reply(text) => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }],
                "modelVersion": "mock-gemini"
            })),
        ),
        GeminiMode::Empty => (StatusCode::OK, Json(json!({ "candidates": [] }))),
        GeminiMode::Status(status) => (
            *status,
            Json(json!({
                "error": { "code": status.as_u16(), "message": "mock failure", "status": "MOCK" }
            })),
        ),
    }
}
