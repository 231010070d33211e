//! Drives the HTTP router against a mock page server, with the real
//! extractor, builtin bindings and in-memory cache.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use titleparser_cache::MokaTitleCache;
use titleparser_gateway::{App, AppState};
use titleparser_resolver::{register_builtin, Dispatcher, GenericExtractor, HttpConfig, Registry};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router() -> Router {
    let extractor = GenericExtractor::new(&HttpConfig::default()).unwrap();
    let mut registry = Registry::new();
    register_builtin(&mut registry, &extractor).unwrap();
    let dispatcher = Dispatcher::new(registry, extractor, MokaTitleCache::new());
    App::router(AppState::new(dispatcher))
}

async fn post_title(router: &Router, url: &str) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/title")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "user": "alice", "channel": "#rust", "url": url }).to_string(),
        ))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn og_title_is_resolved_once_then_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"<html><head><title>Example Page | Site</title>
                <meta property="og:title" content="Example Page"></head></html>"#,
                "text/html",
            ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let router = router();
    let url = format!("{}/article", server.uri());

    let first = post_title(&router, &url).await;
    let second = post_title(&router, &url).await;

    assert_eq!(first["title"], "Example Page");
    assert_eq!(second["title"], "Example Page");
    assert_eq!(second["user"], "alice");
    assert_eq!(first["timestamp"], second["timestamp"]);
}

#[tokio::test]
async fn failures_are_cached_and_reported() {
    let server = MockServer::start().await;
    Mock::given(path("/rate-limited"))
        .respond_with(ResponseTemplate::new(429).set_body_raw("Slow down", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let router = router();
    let url = format!("{}/rate-limited", server.uri());

    for _ in 0..2 {
        let body = post_title(&router, &url).await;
        assert_eq!(body["title"], "");
        assert_eq!(body["error"]["code"], "rate-limited");
    }
}

#[tokio::test]
async fn image_links_are_not_html() {
    let server = MockServer::start().await;
    Mock::given(path("/cat.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
        )
        .mount(&server)
        .await;

    let body = post_title(&router(), &format!("{}/cat.png", server.uri())).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["error"]["code"], "not-html");
}

#[tokio::test]
async fn silenced_sites_get_an_empty_title_without_error() {
    let body = post_title(&router(), "https://twitter.com/someone/status/1").await;

    assert_eq!(body["title"], "");
    assert!(body.get("error").is_none());
}
