//! API Handlers
//!
//! HTTP request handlers for each shortener endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::debug;

use crate::api::page::{self, PageResult};
use crate::config::Config;
use crate::error::{Result, ShortenerError};
use crate::models::{
    HealthResponse, ResolveResponse, ShortenForm, ShortenRequest, ShortenResponse, StatsResponse,
};
use crate::shortener::ShortenerService;
use crate::store::{format_remaining, Clock, LinkStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ShortenerService>,
    /// The store behind `service`, kept for lifecycle and stats
    pub store: Arc<LinkStore>,
}

impl AppState {
    /// Creates a new AppState serving links from `store`.
    pub fn new(store: Arc<LinkStore>, config: &Config) -> Self {
        let service = ShortenerService::from_config(store.clone(), config);
        Self {
            service: Arc::new(service),
            store,
        }
    }

    /// Creates a new AppState with a fresh store on the system clock.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(LinkStore::default()), config)
    }
}

/// Handler for POST /api/shorten
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        debug!("Rejected shorten body: {}", rejection);
        ShortenerError::InvalidRequest("Invalid JSON".to_string())
    })?;

    let shortened = state.service.shorten(&req.url)?;

    Ok(Json(ShortenResponse::new(
        state.service.short_url(&shortened.record),
    )))
}

/// Handler for GET /api/:token
pub async fn resolve_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ResolveResponse>> {
    match state.service.resolve(&token)? {
        Some(record) => Ok(Json(ResolveResponse::new(record.original_url()))),
        None => Err(ShortenerError::NotFound(token)),
    }
}

/// Handler for GET /:token
///
/// Redirects to the original URL with 302 Found.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response> {
    let record = state
        .service
        .resolve(&token)?
        .ok_or(ShortenerError::NotFound(token))?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, record.original_url().to_string())],
    )
        .into_response())
}

/// Handler for GET /
pub async fn index_handler() -> Html<String> {
    Html(page::render(None))
}

/// Handler for POST / (HTML form)
///
/// Invalid URLs are reported in the page; other failures are internal errors.
pub async fn form_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<Html<String>> {
    let result = match state.service.shorten(&form.url) {
        Ok(shortened) => {
            let now = state.service.clock().now();
            PageResult {
                status: "Shortening successful".to_string(),
                short_url: Some(state.service.short_url(&shortened.record)),
                expires_in: Some(format_remaining(shortened.record.remaining_at(now))),
                original_url: Some(form.url),
            }
        }
        Err(ShortenerError::InvalidUrl(_)) => PageResult::message("Invalid URL format!"),
        Err(e) => return Err(e),
    };

    Ok(Html(page::render(Some(&result))))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.store.stats(),
        state.store.is_sweeping(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
