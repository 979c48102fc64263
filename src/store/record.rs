//! Link Record Module
//!
//! Defines the immutable record mapping an original URL to its short token.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{Result, ShortenerError};

// == Link Record ==
/// A shortened link with its lifetime.
///
/// Records never change once built; the store hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    original_url: String,
    short_token: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl LinkRecord {
    // == Constructor ==
    /// Creates a record living for `ttl` from `created_at`.
    ///
    /// # Errors
    /// `InvalidRecord` if `ttl` is not strictly positive, or the url or token is empty.
    pub fn new(
        original_url: impl Into<String>,
        short_token: impl Into<String>,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self> {
        if ttl <= Duration::zero() {
            return Err(ShortenerError::InvalidRecord(format!(
                "TTL must be positive, got {}s",
                ttl.num_seconds()
            )));
        }
        let expires_at = created_at
            .checked_add_signed(ttl)
            .ok_or_else(|| ShortenerError::InvalidRecord("TTL overflows timestamp".to_string()))?;

        let original_url = original_url.into();
        let short_token = short_token.into();
        if original_url.is_empty() || short_token.is_empty() {
            return Err(ShortenerError::InvalidRecord(
                "url and token must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            original_url,
            short_token,
            created_at,
            expires_at,
        })
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn short_token(&self) -> &str {
        &self.short_token
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks if the record has expired at `now`.
    ///
    /// Boundary condition: a record is still live at exactly `expires_at` and
    /// expired at any later instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    // == Time Remaining ==
    /// Returns how long the record has left, or zero once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        let left = self.expires_at - now;
        if left > Duration::zero() {
            left
        } else {
            Duration::zero()
        }
    }
}

/// Renders a duration as `"{days}d {hours}h {minutes}m {seconds}s"`.
///
/// Negative durations render as zero.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}
