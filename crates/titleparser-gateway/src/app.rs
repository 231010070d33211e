use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, title_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/title", post(title_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use titleparser_cache::MokaTitleCache;
    use titleparser_core::{resolver_fn, ResolveError};
    use titleparser_resolver::{Dispatcher, Registry};
    use tower::ServiceExt;

    fn router() -> Router {
        let mut registry = Registry::new();
        registry
            .register(
                r"^https://blocked\.example/",
                resolver_fn(|_url| async { Err(ResolveError::TitleNotFound) }),
            )
            .unwrap();
        let fallback = resolver_fn(|url| async move { Ok(format!("Title of {url}")) });
        let dispatcher = Dispatcher::new(registry, fallback, MokaTitleCache::new());
        App::router(AppState::new(dispatcher))
    }

    fn post_title(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/title")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn title_populates_the_record() {
        let request = json!({
            "user": "alice",
            "channel": "#rust",
            "url": "https://example.com",
            "title": "client supplied",
            "ttl": 1,
        });

        let response = router()
            .oneshot(post_title(request.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["user"], "alice");
        assert_eq!(body["channel"], "#rust");
        assert_eq!(body["title"], "Title of https://example.com");
        assert_eq!(
            body["ttl"].as_i64().unwrap() - body["timestamp"].as_i64().unwrap(),
            86_400
        );
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn failed_resolution_is_still_ok() {
        let request = json!({ "url": "https://blocked.example/page" });

        let response = router()
            .oneshot(post_title(request.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "");
        assert_eq!(body["error"]["code"], "title-not-found");
    }

    #[tokio::test]
    async fn shutdown_cancels_resolution() {
        let shutdown = tokio_util::sync::CancellationToken::new();
        shutdown.cancel();
        let dispatcher = Dispatcher::new(
            Registry::new(),
            resolver_fn(|_url| async { Ok("never".to_string()) }),
            MokaTitleCache::new(),
        );
        let router = App::router(AppState::new(dispatcher).with_shutdown(shutdown));

        let response = router
            .oneshot(post_title(json!({ "url": "https://example.com" }).to_string()))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["title"], "");
        assert_eq!(body["error"]["code"], "cancelled");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let response = router().oneshot(post_title("{ not json")).await.unwrap();
        assert!(response.status().is_client_error());

        let response = router()
            .oneshot(post_title(json!({ "user": "alice" }).to_string()))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
