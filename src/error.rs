//! Error types for the shortener
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

// == Shortener Error Enum ==
/// Unified error type for the shortener.
///
/// Absence of a link is not an error at the store level; `NotFound` only
/// exists so HTTP handlers can turn an empty lookup into a 404.
#[derive(Error, Debug)]
pub enum ShortenerError {
    /// Malformed request body
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// URL failed structural validation
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No live link for the given token
    #[error("Link not found: {0}")]
    NotFound(String),

    /// Backing storage failed (connectivity, transport, query)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Every generated token collided with a live link
    #[error("Could not allocate a unique token after {0} attempts")]
    TokenSpaceExhausted(usize),

    /// A sweeper is already attached to the store
    #[error("Sweeper is already running")]
    SweeperAlreadyRunning,

    /// Record construction rejected its inputs
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShortenerError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShortenerError::InvalidRequest(_) | ShortenerError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortenerError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortenerError::Storage(_)
            | ShortenerError::TokenSpaceExhausted(_)
            | ShortenerError::SweeperAlreadyRunning
            | ShortenerError::InvalidRecord(_)
            | ShortenerError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to a client.
    ///
    /// Internal failures collapse to a generic message; the detail is only logged.
    pub fn public_message(&self) -> String {
        match self {
            ShortenerError::InvalidRequest(msg) => msg.clone(),
            ShortenerError::InvalidUrl(_) => "Invalid URL format".to_string(),
            ShortenerError::NotFound(_) => "Link not found".to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ShortenerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse::new(self.public_message()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the shortener.
pub type Result<T> = std::result::Result<T, ShortenerError>;
