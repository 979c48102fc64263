//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use mini_shortener::{
    api::create_router,
    store::{Clock, ManualClock},
    AppState, Config, LinkRecord, LinkStore, LookupMode,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn manual_app() -> (Arc<ManualClock>, AppState, Router) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    ));
    let store = Arc::new(LinkStore::new(clock.clone()));
    let state = AppState::new(store, &Config::default());
    let app = create_router(state.clone());
    (clock, state, app)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn shorten_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/shorten")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn shorten(app: &Router, body: &'static str) -> String {
    let response = app.clone().oneshot(shorten_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    json["short_url"].as_str().unwrap().to_string()
}

fn token_of(short_url: &str) -> &str {
    short_url.rsplit('/').next().unwrap()
}

// == Shorten Endpoint Tests ==

#[tokio::test]
async fn test_shorten_endpoint_success() {
    let (_, _, app) = manual_app();

    let short_url = shorten(&app, r#"{"url":"https://example.com"}"#).await;

    assert!(short_url.starts_with("http://localhost:8000/"));
    assert_eq!(token_of(&short_url).len(), 10);
}

#[tokio::test]
async fn test_shorten_endpoint_idempotent() {
    let (_, state, app) = manual_app();

    let first = shorten(&app, r#"{"url":"https://example.com/a"}"#).await;
    let second = shorten(&app, r#"{"url":"https://example.com/a"}"#).await;

    assert_eq!(first, second);
    assert_eq!(state.store.len(), 1);
}

#[tokio::test]
async fn test_shorten_invalid_json() {
    let (_, _, app) = manual_app();

    let response = app
        .oneshot(shorten_request(r#"{"url": "https://example.com""#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (_, state, app) = manual_app();

    let response = app
        .oneshot(shorten_request(r#"{"url":"example.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Invalid URL format");
    assert!(state.store.is_empty());
}

// == Resolve Endpoint Tests ==

#[tokio::test]
async fn test_resolve_endpoint_success() {
    let (_, _, app) = manual_app();
    let short_url = shorten(&app, r#"{"url":"https://example.com/page"}"#).await;

    let response = app
        .oneshot(get(&format!("/api/{}", token_of(&short_url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["original_url"], "https://example.com/page");
}

#[tokio::test]
async fn test_resolve_endpoint_not_found() {
    let (_, _, app) = manual_app();

    let response = app.oneshot(get("/api/abc1234567")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Link not found");
}

#[tokio::test]
async fn test_resolve_after_expiration() {
    let (clock, state, app) = manual_app();
    let short_url = shorten(&app, r#"{"url":"https://example.com"}"#).await;
    let path = format!("/api/{}", token_of(&short_url));

    clock.advance(Duration::days(7) + Duration::seconds(1));

    let response = app.clone().oneshot(get(&path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(state.store.is_empty());

    // Shortening again issues a fresh link
    let renewed = shorten(&app, r#"{"url":"https://example.com"}"#).await;
    let response = app
        .oneshot(get(&format!("/api/{}", token_of(&renewed))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// == Redirect Tests ==

#[tokio::test]
async fn test_redirect_to_original() {
    let (_, _, app) = manual_app();
    let short_url = shorten(&app, r#"{"url":"https://example.com/landing"}"#).await;

    let response = app
        .oneshot(get(&format!("/{}", token_of(&short_url))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/landing"
    );
}

// == HTML Form Tests ==

#[tokio::test]
async fn test_form_submission() {
    let (_, state, app) = manual_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("url=https%3A%2F%2Fexample.com%2Fform"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("Shortening successful"));
    assert!(html.contains("Expires in: 7d 0h 0m 0s"));
    assert!(state
        .store
        .lookup("https://example.com/form", LookupMode::ByUrl)
        .is_some());
}

#[tokio::test]
async fn test_form_submission_invalid_url() {
    let (_, _, app) = manual_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("url=not-a-url"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("Invalid URL format!"));
}

// == Stats and Health ==

#[tokio::test]
async fn test_stats_endpoint() {
    let (clock, _, app) = manual_app();
    let short_url = shorten(&app, r#"{"url":"https://example.com"}"#).await;
    clock.advance(Duration::days(8));
    let _ = app
        .clone()
        .oneshot(get(&format!("/api/{}", token_of(&short_url))))
        .await
        .unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["inserts"], 1);
    assert_eq!(json["lazy_evictions"], 1);
    assert_eq!(json["total_records"], 0);
    assert_eq!(json["sweeper_running"], false);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (_, _, app) = manual_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Store Scenarios ==

#[test]
fn test_record_expires_after_ttl() {
    let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(t));
    let store = LinkStore::new(clock.clone());
    store.insert(LinkRecord::new("https://example.com", "abc1234567", t, Duration::days(7)).unwrap());

    let found = store.lookup("abc1234567", LookupMode::ByToken).unwrap();
    assert_eq!(found.original_url(), "https://example.com");
    assert_eq!(found.expires_at(), clock.now() + Duration::days(7));
    let before = store.len();

    clock.advance(Duration::days(7) + Duration::seconds(1));

    assert!(store.lookup("abc1234567", LookupMode::ByToken).is_none());
    assert_eq!(store.len(), before - 1);
}

#[test]
fn test_delete_missing_is_noop() {
    let store = LinkStore::default();
    assert!(!store.delete("https://example.com"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shortens_resolve_to_own_url() {
    let state = AppState::from_config(&Config::default());

    let tasks: Vec<_> = (0..200)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                let url = format!("https://example.com/item/{}", i);
                let shortened = state.service.shorten(&url).unwrap();
                let resolved = state
                    .service
                    .resolve(shortened.record.short_token())
                    .unwrap()
                    .unwrap();
                assert_eq!(resolved.original_url(), url);
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(state.store.len(), 200);
}

#[tokio::test]
async fn test_sweeper_lifecycle_through_state() {
    let (clock, state, _) = manual_app();
    state.service.shorten("https://example.com/old").unwrap();
    clock.advance(Duration::days(8));

    state
        .store
        .start_sweeper(std::time::Duration::from_millis(50))
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    assert!(state.store.is_empty());
    assert!(state.store.stop_sweeper());
    assert!(!state.store.stop_sweeper());
}
