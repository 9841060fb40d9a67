//! Error types for the visualization server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or serving.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Step generation was wired to the wrong input shape
    #[error("Generation error: {0}")]
    Generation(#[from] algoviz_steps::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] axum::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
