pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route("/api/v1/layout/paginate", post(handlers::handle_paginate))
        .route("/api/v1/layout/validate", post(handlers::handle_validate))
        .route("/api/v1/layout/units", post(handlers::handle_units))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::layout::{default_page_config, OverflowPolicy, PaginationOptions, PaperSize};

    fn test_state(max_pages_per_column: usize) -> AppState {
        let mut page_config = default_page_config(PaperSize::A4);
        page_config.max_pages_per_column = max_pages_per_column;
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                paper_size: PaperSize::A4,
                max_pages_per_column,
                overflow_policy: OverflowPolicy::Truncate,
            },
            page_config,
            options: PaginationOptions::default(),
        }
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn long_resume(jobs: usize, highlights: usize) -> Value {
        let work: Vec<Value> = (0..jobs)
            .map(|i| {
                json!({
                    "company": format!("Company {i}"),
                    "position": "Engineer",
                    "startDate": "2020-01",
                    "highlights": vec!["Delivered a measurable improvement to a production system"; highlights],
                })
            })
            .collect();
        json!({ "basics": { "name": "Ada Lovelace" }, "work": work })
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(10));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-pager");
    }

    #[tokio::test]
    async fn test_paginate_returns_numbered_pages() {
        let body = json!({
            "resume": {
                "basics": { "name": "Ada Lovelace", "summary": "Engineer." },
                "work": [{ "company": "Acme", "position": "Dev", "startDate": "2021", "highlights": ["Built it"] }],
                "skills": [{ "name": "Languages", "keywords": ["Rust", "Go"] }]
            }
        });
        let (status, json) = post_json(build_router(test_state(10)), "/api/v1/layout/paginate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pages"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["pages"][0]["pageNumber"], 1);
        assert_eq!(json["pages"][0]["header"]["name"], "Ada Lovelace");
        assert_eq!(json["pages"][0]["summary"], "Engineer.");
        assert_eq!(json["pages"][0]["leftColumn"]["work"][0]["company"], "Acme");
        assert_eq!(json["pages"][0]["leftColumn"]["work"][0]["highlights"][0], "Built it");
        assert_eq!(json["pages"][0]["rightColumn"]["skills"][0]["name"], "Languages");
        assert_eq!(json["truncated"], json!([]));
        assert_eq!(json["fontScale"], 1.0);
    }

    #[tokio::test]
    async fn test_paginate_error_policy_maps_to_422() {
        let body = json!({ "resume": long_resume(10, 10), "overflow": "error" });
        let (status, json) = post_json(build_router(test_state(1)), "/api/v1/layout/paginate", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "PAGE_LIMIT_EXCEEDED");
    }

    #[tokio::test]
    async fn test_paginate_truncates_by_default() {
        let body = json!({ "resume": long_resume(10, 10) });
        let (status, json) = post_json(build_router(test_state(1)), "/api/v1/layout/paginate", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["pages"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["truncated"][0]["column"], "left");
    }

    #[tokio::test]
    async fn test_validate_empty_resume() {
        let (status, json) =
            post_json(build_router(test_state(10)), "/api/v1/layout/validate", json!({ "resume": {} })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isValid"], true);
        assert_eq!(json["pageCount"], 1);
    }

    #[tokio::test]
    async fn test_units_honours_paper_size() {
        let body = json!({
            "resume": { "achievements": ["Won a prize"] },
            "paperSize": "letter"
        });
        let (status, json) = post_json(build_router(test_state(10)), "/api/v1/layout/units", body).await;
        assert_eq!(status, StatusCode::OK);
        let units = json.as_array().cloned().unwrap_or_default();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0]["type"], "section-title");
        assert_eq!(units[1]["type"], "achievement-item");
        assert_eq!(units[1]["column"], "right");
    }

    #[tokio::test]
    async fn test_missing_resume_is_client_error() {
        let (status, _) =
            post_json(build_router(test_state(10)), "/api/v1/layout/paginate", json!({})).await;
        assert!(status.is_client_error(), "got {status}");
    }
}
