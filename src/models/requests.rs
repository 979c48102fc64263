//! Request DTOs for the shortener API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for POST /api/shorten
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    /// The long URL to shorten
    pub url: String,
}

/// Form body for POST / (HTML form)
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}
