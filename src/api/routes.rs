use crate::api::{faq, forms, handlers, AppState};
use crate::metrics::track_http_metrics;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Routes mounted under `/api`
fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/submissions", get(handlers::list_submissions))
        .route("/stats", get(handlers::get_stats))
        // Contact form
        .route(
            "/contact",
            post(forms::submit_contact).get(forms::list_contacts),
        )
        .route("/contact/:id", get(forms::get_contact))
        // Service requests
        .route(
            "/services",
            post(forms::submit_service_request).get(forms::list_service_requests),
        )
        .route("/services/stats", get(forms::service_stats))
        .route("/services/:id", get(forms::get_service_request))
        // Internship applications
        .route(
            "/training",
            post(forms::submit_internship_application).get(forms::list_internship_applications),
        )
        .route("/training/stats", get(forms::internship_stats))
        .route("/training/areas", get(forms::internship_areas))
        .route("/training/:id", get(forms::get_internship_application))
        // FAQ search
        .route("/faq/search", post(faq::search))
        .route("/faq/all", get(faq::all))
        .route("/faq/categories", get(faq::categories))
        .route("/faq/category/:category", get(faq::by_category))
        .route("/faq/health", get(faq::health))
        .route("/faq/reload", post(faq::reload))
        .fallback(handlers::not_found)
}

/// Build the main router
///
/// Anything outside `/api`, `/health` and `/metrics` is served from
/// `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api_router())
        .route_layer(middleware::from_fn(track_http_metrics))
        // Add state
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
