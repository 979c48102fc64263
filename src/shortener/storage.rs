//! Storage seam between the service and its backing store.

use std::sync::Arc;

use crate::error::Result;
use crate::store::{LinkRecord, LinkStore, LookupMode};

/// Operations the shortener needs from a link backend.
///
/// The in-memory store never fails. A persistent backend reports
/// connectivity or query failures as `ShortenerError::Storage`.
pub trait LinkStorage: Send + Sync {
    /// Returns the live record for `key`, or `None`.
    fn find(&self, key: &str, mode: LookupMode) -> Result<Option<Arc<LinkRecord>>>;

    /// Adds or replaces the record for its original URL.
    fn save(&self, record: LinkRecord) -> Result<()>;

    /// Saves `record` only if its token is not held by a live record of
    /// another URL. Returns false, saving nothing, when the token is taken.
    ///
    /// The check and the write must be one atomic step on the backend.
    fn save_new(&self, record: LinkRecord) -> Result<bool>;

    /// Removes the record for `original_url`; absent is not an error.
    fn remove(&self, original_url: &str) -> Result<()>;

    /// Removes every expired record, returning how many went.
    fn purge_expired(&self) -> Result<usize>;
}

impl LinkStorage for LinkStore {
    fn find(&self, key: &str, mode: LookupMode) -> Result<Option<Arc<LinkRecord>>> {
        Ok(self.lookup(key, mode))
    }

    fn save(&self, record: LinkRecord) -> Result<()> {
        self.insert(record);
        Ok(())
    }

    fn save_new(&self, record: LinkRecord) -> Result<bool> {
        Ok(self.insert_if_token_free(record))
    }

    fn remove(&self, original_url: &str) -> Result<()> {
        self.delete(original_url);
        Ok(())
    }

    fn purge_expired(&self) -> Result<usize> {
        Ok(self.sweep_expired())
    }
}
