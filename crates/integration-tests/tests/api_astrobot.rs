mod support;

use axum::http::StatusCode;
use serde_json::json;

use support::api_app::{
    FormPart, TestUpstreams, build_test_router, error_code, post_json, post_multipart, send_json,
};
use support::mock_upstream::{MockGemini, MockNasa, UpstreamMode};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[tokio::test]
async fn greeting_with_only_ai_credentials_is_answered_by_ai() {
    let gemini = MockGemini::replying("Hello, space explorer!");
    let server = gemini.start().await;
    let app = build_test_router(TestUpstreams::gemini(&MockGemini::api_base(&server)));

    let response = send_json(&app, post_json("/api/astrobot", json!({ "message": "hello" }))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiSource"], "ai");
    assert_eq!(response.body["response"], "Hello, space explorer!");

    let calls = gemini.calls.lock().await.clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "gemini-2.0-flash-exp:generateContent");
    assert!(calls[0].1["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .is_some_and(|prompt| prompt.contains("AstroBot")));
}

#[tokio::test]
async fn asteroid_question_is_answered_from_nasa_data() {
    let nasa = MockNasa::new(UpstreamMode::Healthy);
    let nasa_server = nasa.start().await;
    let gemini = MockGemini::replying("unused");
    let gemini_server = gemini.start().await;
    let app = build_test_router(TestUpstreams::both(
        &nasa_server.base_url,
        &MockGemini::api_base(&gemini_server),
    ));

    let response = send_json(
        &app,
        post_json(
            "/api/astrobot",
            json!({ "message": "tell me about asteroids near earth" }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiSource"], "nasa");
    let text = response.body["response"].as_str().unwrap_or_default();
    assert!(text.chars().any(|ch| ch.is_ascii_digit()));
    assert!(text.contains("41287"));
    assert_eq!(gemini.call_count().await, 0);

    let requests = nasa.requests.lock().await.clone();
    assert_eq!(requests[0].0, "neo_browse");
}

#[tokio::test]
async fn nasa_failure_falls_through_to_ai_without_error() {
    let nasa = MockNasa::new(UpstreamMode::Status(StatusCode::SERVICE_UNAVAILABLE));
    let nasa_server = nasa.start().await;
    let gemini = MockGemini::replying("Asteroids are rocky remnants from the early solar system.");
    let gemini_server = gemini.start().await;
    let app = build_test_router(TestUpstreams::both(
        &nasa_server.base_url,
        &MockGemini::api_base(&gemini_server),
    ));

    let response =
        send_json(&app, post_json("/api/astrobot", json!({ "message": "asteroid" }))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiSource"], "ai");
    assert!(
        !response.body["response"]
            .as_str()
            .unwrap_or_default()
            .is_empty()
    );
    assert_eq!(nasa.request_count().await, 1);
    assert_eq!(gemini.call_count().await, 1);
}

#[tokio::test]
async fn uploaded_image_is_answered_by_ai_regardless_of_keywords() {
    let nasa = MockNasa::new(UpstreamMode::Healthy);
    let nasa_server = nasa.start().await;
    let gemini = MockGemini::replying("That looks like the Orion Nebula.");
    let gemini_server = gemini.start().await;
    let app = build_test_router(TestUpstreams::both(
        &nasa_server.base_url,
        &MockGemini::api_base(&gemini_server),
    ));

    let response = send_json(
        &app,
        post_multipart(
            "/api/astrobot",
            &[
                FormPart::Text("message", "is this an asteroid near mars?"),
                FormPart::Text("conversationHistory", "[]"),
                FormPart::File {
                    name: "image",
                    filename: "sky.png",
                    content_type: "image/png",
                    bytes: PNG_BYTES,
                },
            ],
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiSource"], "ai");
    assert_eq!(response.body["response"], "That looks like the Orion Nebula.");
    assert_eq!(nasa.request_count().await, 0);

    let calls = gemini.calls.lock().await.clone();
    let inline = &calls[0].1["contents"][0]["parts"][1]["inline_data"];
    assert_eq!(inline["mime_type"], "image/png");
    assert_eq!(inline["data"], "iVBORw0KGgo=");
}

#[tokio::test]
async fn image_with_empty_message_uses_default_prompt() {
    let gemini = MockGemini::replying("A crater field.");
    let server = gemini.start().await;
    let app = build_test_router(TestUpstreams::gemini(&MockGemini::api_base(&server)));

    let response = send_json(
        &app,
        post_multipart(
            "/api/astrobot",
            &[FormPart::File {
                name: "image",
                filename: "moon.jpg",
                content_type: "image/jpeg",
                bytes: PNG_BYTES,
            }],
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let calls = gemini.calls.lock().await.clone();
    assert!(calls[0].1["contents"][0]["parts"][0]["text"]
        .as_str()
        .is_some_and(|prompt| prompt.starts_with("What do you see in this image?")));
}

#[tokio::test]
async fn no_credentials_uses_canned_answers() {
    let app = build_test_router(TestUpstreams::default());

    let earth = send_json(
        &app,
        post_json("/api/astrobot", json!({ "message": "Tell me about Earth" })),
    )
    .await;
    assert_eq!(earth.status, StatusCode::OK);
    assert_eq!(earth.body["apiSource"], "ai");
    assert!(earth.body["response"]
        .as_str()
        .is_some_and(|text| text.starts_with("Earth is our home planet")));

    let unknown = send_json(
        &app,
        post_json("/api/astrobot", json!({ "message": "what is a quasar" })),
    )
    .await;
    assert!(unknown.body["response"]
        .as_str()
        .is_some_and(|text| text.contains("near-Earth objects")));
}

#[tokio::test]
async fn failing_ai_call_still_returns_persona_text() {
    let gemini = MockGemini::new(support::mock_upstream::GeminiMode::Status(
        StatusCode::INTERNAL_SERVER_ERROR,
    ));
    let server = gemini.start().await;
    let app = build_test_router(TestUpstreams::gemini(&MockGemini::api_base(&server)));

    let response = send_json(
        &app,
        post_json("/api/astrobot", json!({ "message": "hi astrobot" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["apiSource"], "ai");
    assert!(response.body["response"]
        .as_str()
        .is_some_and(|text| text.starts_with("Hello, space explorer!")));
}

#[tokio::test]
async fn conversation_history_is_bounded_and_forwarded() {
    let gemini = MockGemini::replying("Saturn has rings of ice.");
    let server = gemini.start().await;
    let app = build_test_router(TestUpstreams::gemini(&MockGemini::api_base(&server)));

    let history = (0..30)
        .map(|index| {
            let role = if index % 2 == 0 { "user" } else { "assistant" };
            json!({ "role": role, "content": format!("turn {index}"), "apiSource": "gemini" })
        })
        .collect::<Vec<_>>();
    let response = send_json(
        &app,
        post_json(
            "/api/astrobot",
            json!({ "message": "and what about saturn?", "conversationHistory": history }),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let calls = gemini.calls.lock().await.clone();
    let contents = calls[0].1["contents"].as_array().cloned().unwrap_or_default();
    // 20 most recent turns (10..=29) start with a user turn, plus the new question.
    assert_eq!(contents.len(), 21);
    assert_eq!(contents[0]["parts"][0]["text"], "turn 10");
    assert_eq!(contents[20]["parts"][0]["text"], "and what about saturn?");
}

#[tokio::test]
async fn empty_question_gets_general_help_and_bad_history_is_rejected() {
    let app = build_test_router(TestUpstreams::default());

    for message in ["", "   "] {
        let blank =
            send_json(&app, post_json("/api/astrobot", json!({ "message": message }))).await;
        assert_eq!(blank.status, StatusCode::OK);
        assert_eq!(blank.body["apiSource"], "ai");
        assert!(blank.body["response"]
            .as_str()
            .is_some_and(|text| text.contains("near-Earth objects")));
    }

    let bad_history = send_json(
        &app,
        post_multipart(
            "/api/astrobot",
            &[
                FormPart::Text("message", "hello"),
                FormPart::Text("conversationHistory", "{oops"),
            ],
        ),
    )
    .await;
    assert_eq!(bad_history.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&bad_history.body), Some("invalid_history"));
}

#[tokio::test]
async fn untyped_image_upload_is_sent_as_jpeg() {
    let gemini = MockGemini::replying("Looks like Jupiter.");
    let server = gemini.start().await;
    let app = build_test_router(TestUpstreams::gemini(&MockGemini::api_base(&server)));

    let response = send_json(
        &app,
        post_multipart(
            "/api/astrobot",
            &[
                FormPart::Text("message", "what planet is this?"),
                FormPart::File {
                    name: "image",
                    filename: "capture.bin",
                    content_type: "application/octet-stream",
                    bytes: PNG_BYTES,
                },
            ],
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["response"], "Looks like Jupiter.");
    let calls = gemini.calls.lock().await.clone();
    assert_eq!(
        calls[0].1["contents"][0]["parts"][1]["inline_data"]["mime_type"],
        "image/jpeg"
    );
}
