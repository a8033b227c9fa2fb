//! HTTP API server for Dynamo.
//!
//! This crate provides the network transport for the extraction pipeline:
//! one analysis endpoint plus health and OpenAPI documentation routes.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dynamo_core::YtDlpSource;
//! use dynamo_llm::{GeminiBackend, GeminiConfig};
//! use dynamo_server::{Server, ServerConfig};
//!
//! let backend = Arc::new(GeminiBackend::new(GeminiConfig::from_env()?)?);
//! let source = Arc::new(YtDlpSource::new());
//! let server = Server::new(backend, source, ServerConfig::new());
//! server.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, Result, ServerError};
pub use routes::{AnalyzeVideoRequest, AnalyzeVideoResponse, KeyConcept};
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use dynamo_core::TranscriptSource;
use dynamo_llm::SharedBackend;

/// The Dynamo HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server over a backend and transcript source.
    pub fn new(
        backend: SharedBackend,
        source: Arc<dyn TranscriptSource>,
        config: ServerConfig,
    ) -> Self {
        Self {
            state: AppState::new(backend, source, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let mut router = Router::new()
            .merge(routes::health_routes())
            .merge(routes::swagger_routes())
            .route("/analyze_video/", post(routes::analyze_video_handler));

        if self.state.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured bind address.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let router = self.router();

        info!("Starting server on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use dynamo_core::StaticSource;
    use dynamo_llm::MockBackend;

    use super::*;

    fn test_server() -> Server {
        let backend = Arc::new(MockBackend::with_text(r#"{"a":"x"}"#));
        let source = Arc::new(StaticSource::empty());
        Server::new(backend, source, ServerConfig::new())
    }

    #[tokio::test]
    async fn test_server_health_endpoint() {
        let app = test_server().router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_headers_present_when_enabled() {
        let app = test_server().router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/analyze_video/")
                    .header("origin", "https://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[test]
    fn test_default_bind_address() {
        let server = test_server();
        assert_eq!(server.bind_address().port(), 8080);
    }
}
