use health_risk_screener::{
    api::{build_router, AppState},
    config::Config,
    metrics::MetricsConfig,
    ml::ScreeningService,
    telemetry::init_tracing,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    // Initialize tracing
    init_tracing(&config.observability);

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Initialize Prometheus metrics
    let metrics_config = if config.observability.prometheus_enabled {
        if let Err(e) = health_risk_screener::metrics::init_metrics() {
            tracing::warn!("Failed to initialize metrics: {}", e);
            tracing::warn!("Continuing without metrics");
            MetricsConfig::disabled()
        } else {
            tracing::info!("Prometheus metrics initialized");
            MetricsConfig::default()
        }
    } else {
        tracing::info!("Prometheus metrics disabled in configuration");
        MetricsConfig::disabled()
    };

    // Load artifacts; a partial set never serves traffic
    tracing::info!("Loading artifacts from {}", config.artifacts.dir.display());
    let service = ScreeningService::from_config(&config).map_err(|e| {
        tracing::error!("Failed to initialize screening service: {}", e);
        e
    })?;

    for stats in service.stats() {
        tracing::info!(
            condition = %stats.condition,
            n_features = stats.n_features,
            normalizer = %stats.normalizer,
            model = %stats.model_name,
            version = %stats.model_version,
            "Assessor ready"
        );
    }

    let app_state = AppState::new(Arc::new(service))
        .with_metrics(metrics_config)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs));

    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Screening: http://{}/v1/screenings/{{condition}}", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
