//! API Module
//!
//! HTTP handlers and routing for the shortener.
//!
//! # Endpoints
//! - `POST /api/shorten` - Shorten a URL (JSON)
//! - `GET /api/:token` - Resolve a token (JSON)
//! - `GET /:token` - Redirect to the original URL
//! - `GET /`, `POST /` - HTML form
//! - `GET /stats` - Store counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
