use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::*;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        success: true,
        status: "healthy".to_string(),
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Every stored submission, grouped by kind
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<Json<SubmissionsResponse>> {
    let data = state.store.snapshot().await?;
    let counts = data.counts();

    Ok(Json(SubmissionsResponse {
        success: true,
        data,
        counts,
    }))
}

#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub success: bool,
    pub data: SubmissionData,
    pub counts: SubmissionCounts,
}

/// Store-wide totals
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StoreStatsResponse>> {
    let data = state.store.snapshot().await?;

    Ok(Json(StoreStatsResponse {
        success: true,
        stats: data.store_stats(),
    }))
}

#[derive(Debug, Serialize)]
pub struct StoreStatsResponse {
    pub success: bool,
    pub stats: StoreStats,
}

/// JSON 404 for unknown API paths
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

/// Prometheus metrics endpoint
///
/// Returns metrics in Prometheus text exposition format
pub async fn metrics() -> impl IntoResponse {
    let metrics = crate::metrics::gather_metrics();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics,
    )
}
