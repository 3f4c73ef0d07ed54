//! FAQ search endpoints

use crate::api::{forms::{json_body, validate_fields}, AppState};
use crate::error::{AppError, Result};
use crate::search::{FaqRecord, SearchResult, SCORING_ALGORITHM};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// `top_k` is read as any JSON number so negative and fractional values
/// reach validation instead of failing deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[validate(range(min = 1.0), custom(function = "validate_whole_number"))]
    pub top_k: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,
}

const SEARCH_FIELDS: &[(&str, &str)] = &[("top_k", "top_k"), ("threshold", "threshold")];

fn validate_whole_number(value: f64) -> std::result::Result<(), ValidationError> {
    if value.fract() != 0.0 {
        return Err(ValidationError::new("whole_number"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
}

/// Rank FAQ records against a free-text query
pub async fn search(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let request = json_body(payload)?;

    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::Validation("Query is required".to_string()));
    }
    validate_fields(&request, SEARCH_FIELDS)?;

    // Saturating cast; the service caps it at max_top_k.
    let top_k = request.top_k.map(|k| k as usize);
    let results = state.faq.search(&query, top_k, request.threshold);
    tracing::info!(query = %query, results = results.len(), "FAQ query answered");

    Ok(Json(SearchResponse {
        success: true,
        total_results: results.len(),
        query,
        results,
    }))
}

#[derive(Debug, Serialize)]
pub struct FaqListResponse {
    pub success: bool,
    pub faqs: Vec<FaqRecord>,
    pub total: usize,
}

impl FaqListResponse {
    fn new(faqs: Vec<FaqRecord>) -> Self {
        Self {
            success: true,
            total: faqs.len(),
            faqs,
        }
    }
}

pub async fn all(State(state): State<AppState>) -> Json<FaqListResponse> {
    Json(FaqListResponse::new(state.faq.get_all()))
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: String,
    pub faqs: Vec<FaqRecord>,
    pub total: usize,
}

pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<CategoryResponse> {
    let faqs = state.faq.get_by_category(&category);

    Json(CategoryResponse {
        success: true,
        total: faqs.len(),
        category,
        faqs,
    })
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
}

pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        success: true,
        categories: state.faq.categories(),
    })
}

#[derive(Debug, Serialize)]
pub struct FaqHealthResponse {
    pub success: bool,
    pub status: String,
    pub total_faqs: usize,
    pub model_ready: bool,
    pub algorithm: String,
    pub vocabulary_size: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<FaqHealthResponse> {
    let stats = state.faq.stats();

    Json(FaqHealthResponse {
        success: true,
        status: "healthy".to_string(),
        total_faqs: stats.total_documents,
        model_ready: state.faq.is_ready(),
        algorithm: SCORING_ALGORITHM.to_string(),
        vocabulary_size: stats.vocabulary_size,
    })
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub total_faqs: usize,
    pub vocabulary_size: usize,
}

/// Rebuild the index from the corpus file
///
/// On failure the previous index keeps serving.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>> {
    let stats = state.faq.reload().await?;

    Ok(Json(ReloadResponse {
        success: true,
        total_faqs: stats.total_documents,
        vocabulary_size: stats.vocabulary_size,
    }))
}
