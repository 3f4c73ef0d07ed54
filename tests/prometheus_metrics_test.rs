//! Prometheus metrics recorded while serving requests

mod common;

use axum::http::StatusCode;
use common::*;
use intake_server::metrics::{gather_metrics, init_metrics};
use serde_json::json;
use std::sync::Once;
use tower::ServiceExt;

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| init_metrics().unwrap());
}

#[tokio::test]
async fn test_http_requests_labelled_by_route_template() {
    init();
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/contact/contact_20250101_120000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/faq/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let output = gather_metrics();
    let metrics = parse_prometheus_output(&output);
    let requests = metrics.get("intake_http_requests_total").unwrap();

    assert!(requests
        .iter()
        .any(|l| l.contains(r#"path="/api/contact/:id""#) && l.contains(r#"status_code="404""#)));
    assert!(requests.iter().any(|l| l.contains(r#"path="/api/faq/all""#)));
    assert!(!requests
        .iter()
        .any(|l| l.contains("contact_20250101_120000")));
    assert!(metrics.contains_key("intake_http_request_duration_seconds"));
}

#[tokio::test]
async fn test_submission_and_search_metrics() {
    init();
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/contact",
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Hi",
                "message": "Hello"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    for query in ["reset password", "zzz nothing matches"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/faq/search", json!({ "query": query })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let metrics = parse_prometheus_output(&gather_metrics());

    let submissions = metrics.get("intake_submissions_total").unwrap();
    assert!(submissions.iter().any(|l| l.contains(r#"kind="contact""#)));

    let searches = metrics.get("intake_faq_searches_total").unwrap();
    assert!(searches.iter().any(|l| l.contains(r#"outcome="hit""#)));
    assert!(searches.iter().any(|l| l.contains(r#"outcome="miss""#)));

    assert!(metrics.contains_key("intake_faq_search_duration_seconds"));
    assert!(metrics.contains_key("intake_faq_corpus_size"));
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_registry() {
    init();
    let app = test_app();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("# TYPE intake_faq_corpus_size gauge"));
    assert!(body.contains("# TYPE intake_faq_search_duration_seconds histogram"));
}
