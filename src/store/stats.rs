//! Store Statistics Module
//!
//! Counts inserts and the two removal paths of the link store.

use serde::Serialize;

// == Store Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of live-or-not-yet-evicted records currently held
    pub total_records: usize,
    /// Number of insert calls
    pub inserts: u64,
    /// Records removed by a lookup that found them expired
    pub lazy_evictions: u64,
    /// Records removed by sweep passes
    pub swept: u64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
    }

    pub fn record_swept(&mut self, count: usize) {
        self.swept += count as u64;
    }

    /// Total records removed because they expired, by either path.
    pub fn expired_total(&self) -> u64 {
        self.lazy_evictions + self.swept
    }

    pub fn set_total_records(&mut self, count: usize) {
        self.total_records = count;
    }
}
