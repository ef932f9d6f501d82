use axum::{http::StatusCode, Json};
use thiserror::Error;

use crate::models::response::ErrorResponse;

#[derive(Debug, Error)]
pub enum MarketError {
    /// Network unreachable, connection refused or timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream API error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MarketError {
    /// Failures the gateway absorbs by substituting fallback data.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            MarketError::Transport(_) | MarketError::UpstreamStatus { .. } | MarketError::Decode(_)
        )
    }
}

/// Error shape returned by the HTTP handlers.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
