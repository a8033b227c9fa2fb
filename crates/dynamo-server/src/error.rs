//! Error types for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use dynamo_core::AnalysisError;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Bad request (invalid grouping parameters and the like).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The LLM provider failed or returned something unusable.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AnalysisError> for ServerError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::Configuration(msg) => ServerError::BadRequest(msg),
            AnalysisError::Parse { reason, .. } => {
                ServerError::Upstream(format!("model returned malformed JSON: {}", reason))
            }
            AnalysisError::Llm(e) => ServerError::Upstream(e.to_string()),
            AnalysisError::Retrieval(msg) => ServerError::Internal(msg),
        }
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ServerError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.to_string();

        match &self {
            ServerError::BadRequest(_) => {
                tracing::warn!(status = %status, code, error = %message, "Client error");
            }
            _ => {
                tracing::error!(status = %status, code, error = %message, "Server error");
            }
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_maps_to_bad_request() {
        let err: ServerError =
            AnalysisError::Configuration("sample size exceeds document count".to_string()).into();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[test]
    fn test_parse_error_maps_to_upstream() {
        let err: ServerError = AnalysisError::Parse {
            reason: "eof".to_string(),
            raw: "{".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::Upstream(_)));
    }

    #[test]
    fn test_llm_error_maps_to_upstream() {
        let err: ServerError =
            AnalysisError::Llm(dynamo_llm::LlmError::Backend("down".to_string())).into();
        assert!(matches!(err, ServerError::Upstream(_)));
    }

    #[test]
    fn test_into_response_status_codes() {
        let response = ServerError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ServerError::Upstream("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ServerError::Internal("oops".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
