//! Integration tests for health and configuration behavior.
//!
//! Run with: cargo test -p relay-service --test health_check

use relay_service::config::{ModelConfig, ProviderKind, RelayConfig};
use relay_service::startup::Application;
use std::time::Duration;

fn test_config(provider: ProviderKind, api_key: Option<&str>) -> RelayConfig {
    RelayConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "info".to_string(),
        },
        provider,
        gemini_api_key: api_key.map(String::from),
        models: ModelConfig {
            chat: vec!["m1".to_string(), "m2".to_string()],
            image: vec!["m1".to_string()],
            translate: vec!["m1".to_string()],
        },
        attempt_timeout: Duration::from_secs(5),
    }
}

/// Spawn the application on a random port and return its base URL.
async fn spawn_app(config: RelayConfig) -> String {
    let app = Application::build(config)
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
async fn health_reports_configured_with_provider() {
    let base = spawn_app(test_config(ProviderKind::Mock, None)).await;

    let body: serde_json::Value = reqwest::get(format!("{}/api/health", base))
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_configured"], true);
}

#[tokio::test]
async fn health_reports_unconfigured_without_credential() {
    let base = spawn_app(test_config(ProviderKind::Gemini, None)).await;

    let body: serde_json::Value = reqwest::get(format!("{}/api/health", base))
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_configured"], false);
}

#[tokio::test]
async fn missing_credential_short_circuits_before_dispatch() {
    let base = spawn_app(test_config(ProviderKind::Gemini, None)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chat", base))
        .json(&serde_json::json!({"message": "hi"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .expect("error must be a string")
        .contains("API key not configured"));
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let base = spawn_app(test_config(ProviderKind::Mock, None)).await;

    let response = reqwest::get(format!("{}/api/nope", base))
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("404 body must be json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn home_serves_the_chat_page() {
    let base = spawn_app(test_config(ProviderKind::Mock, None)).await;

    let response = reqwest::get(format!("{}/", base))
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.expect("body");
    assert!(body.contains("Friction AI"));
}
