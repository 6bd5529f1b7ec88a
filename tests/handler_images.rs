mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::{Value, json};
use tr1p_site::api::handlers::generate_image_handler;
use tr1p_site::application::services::{ImageSettings, SAMPLE_IMAGES};
use tr1p_site::state::AppState;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_images_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/images/generate", post(generate_image_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_generate_test_mode_returns_sample_image() {
    let content = common::create_content_dir();
    let server = create_images_server(common::create_test_state(content.path()));

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "a cat astronaut", "test": true }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Image generated successfully.");
    assert!(SAMPLE_IMAGES.contains(&json["url"].as_str().unwrap()));
}

#[tokio::test]
async fn test_generate_without_key_reports_failure() {
    let content = common::create_content_dir();
    let server = create_images_server(common::create_test_state(content.path()));

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "a lighthouse" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["url"], "");
    assert_eq!(
        json["message"],
        "Failed to generate image. No API key configured"
    );
}

#[tokio::test]
async fn test_generate_blank_prompt_rejected() {
    let content = common::create_content_dir();
    let server = create_images_server(common::create_test_state(content.path()));

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "  \n ", "test": true }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_generate_prompt_too_long_rejected() {
    let content = common::create_content_dir();
    let server = create_images_server(common::create_test_state(content.path()));

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "x".repeat(4001), "test": true }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_generate_live_calls_provider() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-configured-key"))
        .and(body_partial_json(json!({
            "model": "dall-e-3",
            "prompt": "a lighthouse at dusk",
            "n": 1,
            "size": "1792x1024"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": 1700000000,
            "data": [
                { "url": "https://images.example/lighthouse.png", "revised_prompt": "lighthouse" }
            ]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let content = common::create_content_dir();
    let state = common::create_test_state_with(
        content.path(),
        &mock.uri(),
        Some("sk-configured-key"),
        common::test_settings(),
    );
    let server = create_images_server(state);

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "a lighthouse at dusk" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["url"], "https://images.example/lighthouse.png");
}

#[tokio::test]
async fn test_generate_live_uses_credential_override() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("authorization", "Bearer sk-from-the-form"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": "https://images.example/override.png" }]
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let content = common::create_content_dir();
    let state = common::create_test_state_with(
        content.path(),
        &mock.uri(),
        None,
        common::test_settings(),
    );
    let server = create_images_server(state);

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "override", "credential": "sk-from-the-form" }))
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["url"], "https://images.example/override.png");
}

#[tokio::test]
async fn test_generate_credential_override_disabled() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let content = common::create_content_dir();
    let state = common::create_test_state_with(
        content.path(),
        &mock.uri(),
        None,
        ImageSettings {
            allow_credential_override: false,
            ..common::test_settings()
        },
    );
    let server = create_images_server(state);

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "override", "credential": "sk-from-the-form" }))
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(
        json["message"],
        "Failed to generate image. No API key configured"
    );
}

#[tokio::test]
async fn test_generate_provider_error_is_reported() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "message": "Your request was rejected by the safety system.",
                "type": "invalid_request_error"
            }
        })))
        .mount(&mock)
        .await;

    let content = common::create_content_dir();
    let state = common::create_test_state_with(
        content.path(),
        &mock.uri(),
        Some("sk-configured-key"),
        common::test_settings(),
    );
    let server = create_images_server(state);

    let response = server
        .post("/api/images/generate")
        .json(&json!({ "prompt": "something rejected" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("Your request was rejected by the safety system.")
    );
}

#[tokio::test]
async fn test_generate_rate_limited_on_full_router() {
    let content = common::create_content_dir();
    let server = common::create_test_server(common::create_test_state(content.path()));

    let mut statuses = Vec::new();
    for _ in 0..12 {
        let response = server
            .post("/api/images/generate")
            .json(&json!({ "prompt": "burst", "test": true }))
            .await;
        statuses.push(response.status_code().as_u16());
    }

    assert!(statuses[..10].iter().all(|&s| s == 200));
    assert!(statuses[10..].contains(&429));
}
