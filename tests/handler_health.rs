mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use tr1p_site::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_without_key() {
    let content = common::create_content_dir();
    let state = common::create_test_state(content.path());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["provider"]["status"], "test_only");
    assert_eq!(json["checks"]["provider"]["message"], "dall-e-3 1792x1024");
    assert_eq!(json["checks"]["drawer_sessions"]["status"], "ok");
    assert_eq!(json["checks"]["drawer_sessions"]["message"], "0");
}

#[tokio::test]
async fn test_health_endpoint_with_key() {
    let content = common::create_content_dir();
    let state = common::create_test_state_with(
        content.path(),
        "http://127.0.0.1:9",
        Some("sk-configured-key"),
        common::test_settings(),
    );
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["provider"]["status"], "live");
}

#[tokio::test]
async fn test_health_counts_drawer_sessions() {
    let content = common::create_content_dir();
    let server = common::create_test_server(common::create_test_state(content.path()));

    server.get("/api/drawer").await.assert_status_ok();
    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["drawer_sessions"]["message"], "0");

    for prompt in ["first visitor", "second visitor"] {
        server
            .post("/api/drawer/entries")
            .json(&serde_json::json!({ "prompt": prompt, "test": true }))
            .await
            .assert_status(axum::http::StatusCode::ACCEPTED);
    }

    let json = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(json["checks"]["drawer_sessions"]["message"], "2");
}
