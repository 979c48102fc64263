//! Shortener Module
//!
//! Turns long URLs into short links on top of a `LinkStorage` backend.

mod service;
mod storage;
mod token;

pub use service::{validate_url, Shortened, ShortenerService, MAX_TOKEN_ATTEMPTS};
pub use storage::LinkStorage;
pub use token::{generate_token, RandomTokens, TokenSource, TOKEN_ALPHABET};
