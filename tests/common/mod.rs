//! Common test utilities
//!
//! Fixtures for the FAQ corpus, an in-process router and helpers for
//! reading JSON response bodies.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use intake_server::{
    api::{build_router, AppState},
    search::{parse_corpus, FaqRecord, FaqSearchConfig, FaqSearchService},
    state::{create_in_memory_store, SubmissionStore},
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Sample corpus shipped in `data/faqs.json`
pub const SAMPLE_CORPUS: &str = include_str!("../../data/faqs.json");

pub fn sample_faqs() -> Vec<FaqRecord> {
    let document: serde_json::Value = serde_json::from_str(SAMPLE_CORPUS).unwrap();
    parse_corpus(document).unwrap()
}

pub fn password_faq() -> FaqRecord {
    FaqRecord::new(
        "How do I reset my password?",
        "Go to settings.",
        vec!["password".to_string(), "reset".to_string()],
        "account",
    )
}

pub fn faq_service(records: Vec<FaqRecord>) -> Arc<FaqSearchService> {
    Arc::new(FaqSearchService::from_records(
        records,
        FaqSearchConfig::default(),
    ))
}

/// Router over an in-memory store and the sample corpus
pub fn test_app() -> Router {
    test_app_with(create_in_memory_store(), faq_service(sample_faqs()))
}

pub fn test_app_with(store: Arc<dyn SubmissionStore>, faq: Arc<FaqSearchService>) -> Router {
    build_router(AppState::new(store, faq), Path::new("public"))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper function to parse Prometheus exposition format
/// Returns a map of metric name to its HELP/TYPE and sample lines
pub fn parse_prometheus_output(output: &str) -> HashMap<String, Vec<String>> {
    let mut metrics = HashMap::new();
    let mut current_metric = String::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("# HELP") || line.starts_with("# TYPE") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                current_metric = parts[2].to_string();
                metrics
                    .entry(current_metric.clone())
                    .or_insert_with(Vec::new)
                    .push(line.to_string());
            }
        } else if !line.starts_with('#') && !current_metric.is_empty() {
            metrics
                .entry(current_metric.clone())
                .or_insert_with(Vec::new)
                .push(line.to_string());
        }
    }

    metrics
}
