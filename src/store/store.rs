//! Link Store Module
//!
//! Expiring key-value store indexed by original URL and by short token.
//! Every operation runs under one exclusive lock, so the two indices are
//! always updated together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{Result, ShortenerError};
use crate::store::{Clock, LinkRecord, StoreStats, SystemClock};
use crate::tasks::Sweeper;

/// Selects which key a lookup matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    ByUrl,
    ByToken,
}

// == Link Index ==
/// The two views over the record set. Callers must hold the store lock.
#[derive(Debug, Default)]
struct LinkIndex {
    /// Owning index: original URL -> record
    by_url: HashMap<String, Arc<LinkRecord>>,
    /// Secondary index: short token -> original URL
    by_token: HashMap<String, String>,
    stats: StoreStats,
}

impl LinkIndex {
    fn insert(&mut self, record: LinkRecord) {
        let url = record.original_url().to_string();
        let token = record.short_token().to_string();

        // Replacing this URL's record frees its previous token.
        self.remove_url(&url);

        // A token can only name one record. If another URL holds it, that
        // record goes too, otherwise it would stay reachable by URL only.
        if let Some(other_url) = self.by_token.get(&token).cloned() {
            warn!(
                "Token '{}' reassigned from '{}' to '{}'",
                token, other_url, url
            );
            self.remove_url(&other_url);
        }

        self.by_token.insert(token, url.clone());
        self.by_url.insert(url, Arc::new(record));
        self.stats.record_insert();
    }

    /// Inserts `record` unless its token names a live record of another URL.
    fn insert_if_token_free(&mut self, record: LinkRecord, now: DateTime<Utc>) -> bool {
        let holder = self
            .by_token
            .get(record.short_token())
            .and_then(|url| self.by_url.get(url));

        if let Some(holder) = holder {
            if holder.original_url() != record.original_url() {
                if !holder.is_expired_at(now) {
                    return false;
                }
                let expired_url = holder.original_url().to_string();
                self.remove_url(&expired_url);
                self.stats.record_lazy_eviction();
            }
        }

        self.insert(record);
        true
    }

    fn remove_url(&mut self, url: &str) -> Option<Arc<LinkRecord>> {
        let record = self.by_url.remove(url)?;
        if self.by_token.get(record.short_token()).map(String::as_str) == Some(url) {
            self.by_token.remove(record.short_token());
        }
        Some(record)
    }

    fn lookup(
        &mut self,
        key: &str,
        mode: LookupMode,
        now: DateTime<Utc>,
    ) -> Option<Arc<LinkRecord>> {
        let record = match mode {
            LookupMode::ByUrl => self.by_url.get(key),
            LookupMode::ByToken => self
                .by_token
                .get(key)
                .and_then(|url| self.by_url.get(url)),
        }?
        .clone();

        if record.is_expired_at(now) {
            self.remove_url(record.original_url());
            self.stats.record_lazy_eviction();
            debug!("Evicted expired link '{}' on lookup", record.short_token());
            return None;
        }

        Some(record)
    }

    fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let expired_urls: Vec<String> = self
            .by_url
            .iter()
            .filter(|(_, record)| record.is_expired_at(now))
            .map(|(url, _)| url.clone())
            .collect();

        for url in &expired_urls {
            self.remove_url(url);
        }

        self.stats.record_swept(expired_urls.len());
        expired_urls.len()
    }
}

// == Store Core ==
/// State shared between the store handle and its sweeper task.
pub(crate) struct StoreCore {
    index: Mutex<LinkIndex>,
    clock: Arc<dyn Clock>,
}

impl StoreCore {
    pub(crate) fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            index: Mutex::new(LinkIndex::default()),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LinkIndex> {
        // Index mutations never leave the maps half-updated, so a poisoned
        // lock still guards a consistent index.
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        self.lock().sweep(now)
    }
}

// == Link Store ==
/// Thread-safe store of live link records.
///
/// Share it behind an `Arc`; all methods take `&self`.
pub struct LinkStore {
    core: Arc<StoreCore>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl LinkStore {
    // == Constructor ==
    /// Creates an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            core: Arc::new(StoreCore::new(clock)),
            sweeper: Mutex::new(None),
        }
    }

    /// Time source used for expiration checks.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.core.clock)
    }

    // == Insert ==
    /// Adds or replaces the record keyed by its original URL.
    ///
    /// The record is visible to both lookup modes once this returns.
    pub fn insert(&self, record: LinkRecord) {
        self.core.lock().insert(record);
    }

    /// Inserts `record` only if no live record of another URL holds its token.
    ///
    /// The check and the insert happen under one lock, so two callers racing
    /// for the same token cannot both succeed. An expired holder is evicted.
    /// Returns false, leaving the store untouched, when the token is taken.
    pub fn insert_if_token_free(&self, record: LinkRecord) -> bool {
        let now = self.core.clock.now();
        self.core.lock().insert_if_token_free(record, now)
    }

    // == Lookup ==
    /// Finds the live record for `key`.
    ///
    /// An expired match is removed before returning `None`.
    pub fn lookup(&self, key: &str, mode: LookupMode) -> Option<Arc<LinkRecord>> {
        let now = self.core.clock.now();
        self.core.lock().lookup(key, mode, now)
    }

    // == Delete ==
    /// Removes the record for `original_url`. Returns whether one was present.
    pub fn delete(&self, original_url: &str) -> bool {
        self.core.lock().remove_url(original_url).is_some()
    }

    // == Sweep Expired ==
    /// Removes every expired record. Returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        self.core.sweep_expired()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.core.lock().by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.lock().by_url.is_empty()
    }

    // == Stats ==
    /// Returns current store counters.
    pub fn stats(&self) -> StoreStats {
        let index = self.core.lock();
        let mut stats = index.stats.clone();
        stats.set_total_records(index.by_url.len());
        stats
    }

    // == Sweeper Lifecycle ==
    /// Starts the background sweeper, passing over the store every `period`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// `SweeperAlreadyRunning` if one is attached, `InvalidConfig` for a zero
    /// period or one too large to schedule.
    pub fn start_sweeper(&self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(ShortenerError::InvalidConfig(
                "sweep interval must be non-zero".to_string(),
            ));
        }

        let mut slot = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(ShortenerError::SweeperAlreadyRunning);
        }
        *slot = Some(Sweeper::start(Arc::clone(&self.core), period)?);
        info!("Link sweeper attached with period {:?}", period);
        Ok(())
    }

    /// Stops the background sweeper. Returns false if none was running.
    pub fn stop_sweeper(&self) -> bool {
        let sweeper = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sweeper {
            Some(sweeper) => {
                sweeper.stop();
                true
            }
            None => false,
        }
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for LinkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkStore")
            .field("records", &self.len())
            .field("sweeping", &self.is_sweeping())
            .finish()
    }
}
