//! Router assembly: HTTP endpoints, body limit, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - JSON API under `/api/v1/...`
/// - request body cap of `max_body_bytes` (oversized bodies fail JSON extraction)
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/validate-submission", post(http::http_validate_submission))
        .route("/api/v1/score", post(http::http_post_score))
        .route(
            "/api/v1/submissions",
            get(http::http_list_submissions).post(http::http_post_submission),
        )
        .route("/api/v1/submissions/{id}", get(http::http_get_submission))
        .route("/api/v1/challenges/{id}/rules", get(http::http_get_rules))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn router(limit: usize) -> Router {
        build_router(Arc::new(AppState::new(&AppConfig::default())), limit)
    }

    async fn post_score(app: Router, body: String) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/score")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let (status, body) = post_score(router(64), "{not json".into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn oversized_body_is_400_with_error_body() {
        let big = format!(
            r#"{{"challengeId":"x","submissionType":"automation","content":{{"code":"{}"}}}}"#,
            "a".repeat(200)
        );
        let (status, body) = post_score(router(64), big).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|e| e.contains("length limit")));
    }

    #[tokio::test]
    async fn score_route_answers_with_result() {
        let body = r#"{"challengeId":"x","submissionType":"automation","content":{"code":"print(1)"}}"#;
        let (status, json) = post_score(router(1024), body.into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["score"], 0);
        assert_eq!(json["status"], "failed");
    }
}
