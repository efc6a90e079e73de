//! HTTP middleware for tracking request metrics
use super::*;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::Gauge;
use std::sync::Arc;
use std::time::Instant;

/// Holds one unit of an in-flight gauge until dropped.
///
/// The request future may be dropped before it completes (timeouts, client
/// disconnects), so the decrement lives in `Drop`.
struct InFlightGuard<'a> {
    gauge: &'a Gauge,
}

impl<'a> InFlightGuard<'a> {
    fn new(gauge: &'a Gauge) -> Self {
        gauge.inc();
        Self { gauge }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

/// Axum middleware recording request count, latency and in-flight requests.
///
/// # Example
/// ```no_run
/// use axum::{middleware, Router};
/// use health_risk_screener::metrics::{track_metrics, MetricsConfig};
/// use std::sync::Arc;
///
/// let app: Router = Router::new()
///     .layer(middleware::from_fn_with_state(
///         Arc::new(MetricsConfig::default()),
///         track_metrics,
///     ));
/// ```
pub async fn track_metrics(
    State(config): State<Arc<MetricsConfig>>,
    req: Request,
    next: Next,
) -> Response {
    if !config.enabled {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if config.is_path_excluded(&path) {
        return next.run(req).await;
    }

    let in_flight = InFlightGuard::new(&HTTP_REQUESTS_IN_FLIGHT);
    let start = Instant::now();
    let response = next.run(req).await;
    drop(in_flight);

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    if config.enable_histograms {
        HTTP_REQUEST_DURATION_SECONDS
            .with_label_values(&[&method, &path])
            .observe(start.elapsed().as_secs_f64());
    }

    response
}
