//! Prometheus metrics for the intake server.
//!
//! - HTTP request counts and latency (recorded by [`track_http_metrics`])
//! - Form submissions accepted, per kind
//! - FAQ search volume, hit/miss outcome and latency
//! - FAQ corpus size
//!
//! Metrics live in a dedicated registry so tests and embedders are not
//! affected by the process-global default registry.
//!
//! # Example
//! ```no_run
//! use intake_server::metrics::{init_metrics, gather_metrics, SUBMISSIONS_TOTAL};
//!
//! init_metrics().expect("metrics registered once");
//! SUBMISSIONS_TOTAL.with_label_values(&["contact"]).inc();
//! println!("{}", gather_metrics());
//! ```

mod middleware;

pub use middleware::track_http_metrics;

use lazy_static::lazy_static;
use prometheus::{CounterVec, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry};

const NAMESPACE: &str = "intake";

lazy_static! {
    /// Registry for all intake metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace(NAMESPACE),
        &["method", "path", "status_code"]
    ).expect("metric can be created");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new("http_request_duration_seconds", "HTTP request latency in seconds")
            .namespace(NAMESPACE)
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["method", "path"]
    ).expect("metric can be created");

    /// Accepted form submissions
    ///
    /// Labels: kind
    pub static ref SUBMISSIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("submissions_total", "Total number of accepted form submissions")
            .namespace(NAMESPACE),
        &["kind"]
    ).expect("metric can be created");

    /// FAQ searches by outcome
    ///
    /// Labels: outcome (hit, miss)
    pub static ref FAQ_SEARCHES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("faq_searches_total", "Total number of FAQ searches")
            .namespace(NAMESPACE),
        &["outcome"]
    ).expect("metric can be created");

    /// FAQ search latency in seconds
    pub static ref FAQ_SEARCH_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("faq_search_duration_seconds", "FAQ search latency in seconds")
            .namespace(NAMESPACE)
            .buckets(vec![0.00001, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05])
    ).expect("metric can be created");

    /// Number of records in the current FAQ index
    pub static ref FAQ_CORPUS_SIZE: Gauge = Gauge::with_opts(
        Opts::new("faq_corpus_size", "Number of FAQ records in the current index")
            .namespace(NAMESPACE)
    ).expect("metric can be created");
}

/// Register all metrics with the registry.
///
/// Call once at startup; a second call fails with `AlreadyReg`.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SUBMISSIONS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(FAQ_SEARCHES_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(FAQ_SEARCH_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(FAQ_CORPUS_SIZE.clone()))?;

    tracing::debug!("Prometheus metrics registered");
    Ok(())
}

/// Export metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}
