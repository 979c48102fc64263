//! Mini Shortener - A lightweight URL shortening server
//!
//! Maps long URLs to short tokens in an expiring in-memory store, with lazy
//! eviction on lookup and a periodic background sweep.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod shortener;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ShortenerError};
pub use shortener::ShortenerService;
pub use store::{LinkRecord, LinkStore, LookupMode};
