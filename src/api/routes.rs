use crate::api::{handlers, AppState};
use crate::metrics::track_metrics;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();
    let metrics_endpoint = metrics.endpoint.clone();
    let timeout = state.request_timeout;

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Questionnaires
        .route("/v1/conditions", get(handlers::list_conditions))
        .route("/v1/conditions/:condition", get(handlers::get_condition))
        // Screening
        .route("/v1/screenings/:condition", post(handlers::screen))
        // Prometheus
        .route(&metrics_endpoint, get(handlers::metrics))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
        .layer(TimeoutLayer::new(timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
