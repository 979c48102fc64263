//! Shortener Service
//!
//! Builds link records and drives the storage backend for the HTTP layer.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ShortenerError};
use crate::shortener::{LinkStorage, RandomTokens, TokenSource};
use crate::store::{Clock, LinkRecord, LinkStore, LookupMode};

/// Generated tokens tried before giving up on a shorten request.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Checks that `raw` is an absolute URL with a non-empty host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let parsed = Url::parse(raw).map_err(|e| ShortenerError::InvalidUrl(e.to_string()))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(ShortenerError::InvalidUrl(format!("'{}' has no host", raw))),
    }
}

/// Outcome of a shorten request.
#[derive(Debug, Clone)]
pub struct Shortened {
    pub record: Arc<LinkRecord>,
    /// False when an existing live link was returned
    pub created: bool,
}

// == Shortener Service ==
pub struct ShortenerService {
    storage: Arc<dyn LinkStorage>,
    tokens: Arc<dyn TokenSource>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    base_url: String,
}

impl ShortenerService {
    pub fn new(
        storage: Arc<dyn LinkStorage>,
        tokens: Arc<dyn TokenSource>,
        clock: Arc<dyn Clock>,
        ttl: chrono::Duration,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            tokens,
            clock,
            ttl,
            base_url: base_url.into(),
        }
    }

    /// Wires the service to an in-memory store using the configured TTL,
    /// token length and base URL. Shares the store's clock.
    pub fn from_config(store: Arc<LinkStore>, config: &Config) -> Self {
        let clock = store.clock();
        Self::new(
            store,
            Arc::new(RandomTokens::new(config.token_length)),
            clock,
            config.ttl(),
            config.base_url.clone(),
        )
    }

    // == Shorten ==
    /// Returns the live link for `url`, creating one if none exists.
    ///
    /// # Errors
    /// - `InvalidUrl` if `url` fails validation
    /// - `TokenSpaceExhausted` if every candidate token is taken
    /// - whatever the backend reports
    pub fn shorten(&self, url: &str) -> Result<Shortened> {
        validate_url(url)?;

        if let Some(record) = self.storage.find(url, LookupMode::ByUrl)? {
            debug!("Reusing link '{}' for {}", record.short_token(), url);
            return Ok(Shortened {
                record,
                created: false,
            });
        }

        // The backend checks the token and saves in one step, so a token
        // claimed concurrently by another URL shows up as a failed attempt.
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let record = LinkRecord::new(url, self.tokens.next_token(), self.clock.now(), self.ttl)?;
            if self.storage.save_new(record.clone())? {
                info!("Shortened {} as '{}'", url, record.short_token());
                return Ok(Shortened {
                    record: Arc::new(record),
                    created: true,
                });
            }
            warn!("Token collision on attempt {}, regenerating", attempt);
        }

        Err(ShortenerError::TokenSpaceExhausted(MAX_TOKEN_ATTEMPTS))
    }

    // == Resolve ==
    /// Returns the live link for `token`, or `None` if absent or expired.
    pub fn resolve(&self, token: &str) -> Result<Option<Arc<LinkRecord>>> {
        self.storage.find(token, LookupMode::ByToken)
    }

    /// Full short URL for a record.
    pub fn short_url(&self, record: &LinkRecord) -> String {
        format!("{}{}", self.base_url, record.short_token())
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
