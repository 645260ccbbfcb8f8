//! Integration tests for the model-backed API routes, using the mock
//! provider.
//!
//! Run with: cargo test -p relay-service --test api

use relay_service::config::{ModelConfig, ProviderKind, RelayConfig};
use relay_service::startup::Application;
use std::time::Duration;

fn mock_config() -> RelayConfig {
    RelayConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        provider: ProviderKind::Mock,
        gemini_api_key: None,
        models: ModelConfig {
            chat: vec!["m1".to_string(), "m2".to_string()],
            image: vec!["m1".to_string()],
            translate: vec!["m1".to_string()],
        },
        attempt_timeout: Duration::from_secs(5),
    }
}

/// Spawn the application on a random port and return its base URL.
async fn spawn_app() -> String {
    let app = Application::build(mock_config())
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn chat_round_trip() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .json(&serde_json::json!({"message": "hello"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], true);
    assert_eq!(body["model_used"], "m1");
    assert!(body["response"]
        .as_str()
        .expect("response must be a string")
        .contains("hello"));
}

#[tokio::test]
async fn chat_requires_message_or_image() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .json(&serde_json::json!({"message": "  "}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Message or image is required");
}

#[tokio::test]
async fn chat_accepts_data_url_images_without_text() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .json(&serde_json::json!({"image": "data:image/png;base64,AAAA"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], true);
    // Image-only requests fall back to the default descriptive prompt.
    assert!(body["response"]
        .as_str()
        .expect("response must be a string")
        .contains("What is in this image?"));
}

#[tokio::test]
async fn chat_rejects_undecodable_images() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .json(&serde_json::json!({"message": "hi", "image": "!!!not-base64!!!"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn generate_image_requires_prompt() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/generate-image", base))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["error"], "Prompt is required");
}

#[tokio::test]
async fn generate_image_round_trip() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/generate-image", base))
        .json(&serde_json::json!({"prompt": "a red fox"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], true);
    assert_eq!(body["original_prompt"], "a red fox");
    assert_eq!(body["style"], "professional");
    assert!(body["platforms"]["dalle3"]["name"].is_string());
}

#[tokio::test]
async fn translate_requires_code_and_target_language() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/translate-code", base))
        .json(&serde_json::json!({"code": "print('hi')"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn translate_round_trip() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/translate-code", base))
        .json(&serde_json::json!({"code": "print('hi')", "target_language": "Rust"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], true);
    assert_eq!(body["model_used"], "m1");
    assert!(body["translated_code"]
        .as_str()
        .expect("translated_code must be a string")
        .contains("print('hi')"));
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .header("content-type", "application/json")
        .body("this is not json")
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("rejection must be json");
    assert_eq!(body["success"], false);
}
