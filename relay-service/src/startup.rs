//! Application startup and lifecycle management.
//!
//! Builds the shared state (config + dispatcher) and the axum router, binds
//! the listener (port 0 = random port for testing), and runs the server.

use crate::config::{ProviderKind, RelayConfig};
use crate::handlers::{self, RelayError};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use crate::services::Dispatcher;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. Immutable after startup; one dispatcher is
/// shared across all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    dispatcher: Option<Dispatcher>,
}

impl AppState {
    pub fn api_configured(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Dispatcher for model-backed routes; absent when no credential is
    /// configured, in which case handlers fail fast without dispatching.
    pub fn dispatcher(&self) -> Result<&Dispatcher, RelayError> {
        self.dispatcher.as_ref().ok_or(RelayError::NotConfigured)
    }
}

/// Serve the static chat page.
async fn home() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// JSON 404 for unknown routes.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "success": false,
        })),
    )
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/chat", post(handlers::chat::chat))
        .route(
            "/api/generate-image",
            post(handlers::image_prompt::generate_image_prompt),
        )
        .route("/api/translate-code", post(handlers::translate::translate_code))
        .route("/api/health", get(handlers::health::health))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let dispatcher = match config.provider {
            ProviderKind::Mock => {
                tracing::info!("Initialized mock text provider");
                let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::new());
                Some(Dispatcher::new(provider, config.attempt_timeout))
            }
            ProviderKind::Gemini => match &config.gemini_api_key {
                Some(api_key) => {
                    tracing::info!("Initialized Gemini text provider");
                    let provider: Arc<dyn TextProvider> =
                        Arc::new(GeminiTextProvider::new(GeminiConfig {
                            api_key: api_key.clone(),
                        }));
                    Some(Dispatcher::new(provider, config.attempt_timeout))
                }
                None => {
                    tracing::warn!(
                        "GEMINI_API_KEY not set; model-backed routes will fail until configured"
                    );
                    None
                }
            },
        };

        let state = AppState {
            config: Arc::new(config.clone()),
            dispatcher,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Relay service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state)).await
    }
}
