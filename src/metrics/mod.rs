//! Prometheus metrics for the screening service.
//!
//! Covers screening outcomes per condition and label, pipeline failures by
//! error code, assessment latency, and HTTP request tracking.
//!
//! # Example
//! ```no_run
//! use health_risk_screener::metrics::ASSESSMENTS_TOTAL;
//!
//! ASSESSMENTS_TOTAL
//!     .with_label_values(&["lung", "high"])
//!     .inc();
//! ```

mod config;
mod middleware;

pub use config::MetricsConfig;
pub use middleware::track_metrics;

use lazy_static::lazy_static;
use prometheus::{CounterVec, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry};

const NAMESPACE: &str = "health_risk_screener";

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP Metrics
    // ============================================================================

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace(NAMESPACE),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    /// Number of in-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: Gauge = Gauge::with_opts(
        Opts::new("http_requests_in_flight", "Number of in-flight HTTP requests")
            .namespace(NAMESPACE)
    ).expect("Failed to create HTTP_REQUESTS_IN_FLIGHT metric");

    // ============================================================================
    // Screening Metrics
    // ============================================================================

    /// Completed screenings
    ///
    /// Labels: condition, label
    pub static ref ASSESSMENTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("assessments_total", "Total number of completed risk assessments")
            .namespace(NAMESPACE),
        &["condition", "label"]
    ).expect("Failed to create ASSESSMENTS_TOTAL metric");

    /// Failed screenings
    ///
    /// Labels: condition, error_code
    pub static ref ASSESSMENT_ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("assessment_errors_total", "Total number of failed risk assessments")
            .namespace(NAMESPACE),
        &["condition", "error_code"]
    ).expect("Failed to create ASSESSMENT_ERRORS_TOTAL metric");

    /// Pipeline latency in seconds
    ///
    /// Labels: condition
    pub static ref ASSESSMENT_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "assessment_duration_seconds",
            "Risk assessment duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.000001, 0.00001, 0.0001, 0.001, 0.01, 0.1]),
        &["condition"]
    ).expect("Failed to create ASSESSMENT_DURATION_SECONDS metric");

    // ============================================================================
    // System Metrics
    // ============================================================================

    /// Application build info
    ///
    /// Labels: version, git_commit
    pub static ref BUILD_INFO: GaugeVec = GaugeVec::new(
        Opts::new("build_info", "Application build information")
            .namespace(NAMESPACE),
        &["version", "git_commit"]
    ).expect("Failed to create BUILD_INFO metric");
}

/// Register all metrics with the Prometheus registry.
///
/// Call once at startup; a second call fails with `AlreadyReg`.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))?;

    PROMETHEUS_REGISTRY.register(Box::new(ASSESSMENTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(ASSESSMENT_ERRORS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(ASSESSMENT_DURATION_SECONDS.clone()))?;

    PROMETHEUS_REGISTRY.register(Box::new(BUILD_INFO.clone()))?;

    BUILD_INFO
        .with_label_values(&[
            env!("CARGO_PKG_VERSION"),
            option_env!("GIT_COMMIT").unwrap_or("unknown"),
        ])
        .set(1.0);

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Generate Prometheus text format metrics
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
