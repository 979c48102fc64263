//! Response DTOs for the shortener API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::StoreStats;

/// Response body for POST /api/shorten
#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

impl ShortenResponse {
    pub fn new(short_url: impl Into<String>) -> Self {
        Self {
            short_url: short_url.into(),
        }
    }
}

/// Response body for GET /api/:token
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    pub original_url: String,
}

impl ResolveResponse {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Records currently held, including expired ones not yet evicted
    pub total_records: usize,
    pub inserts: u64,
    pub lazy_evictions: u64,
    pub swept: u64,
    /// Whether the background sweeper is attached
    pub sweeper_running: bool,
}

impl StatsResponse {
    pub fn new(stats: StoreStats, sweeper_running: bool) -> Self {
        Self {
            total_records: stats.total_records,
            inserts: stats.inserts,
            lazy_evictions: stats.lazy_evictions,
            swept: stats.swept,
            sweeper_running,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
