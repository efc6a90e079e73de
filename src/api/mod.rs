pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::metrics::MetricsConfig;
use crate::ml::ScreeningService;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScreeningService>,
    pub metrics: Arc<MetricsConfig>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(service: Arc<ScreeningService>) -> Self {
        Self {
            service,
            metrics: Arc::new(MetricsConfig::default()),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the HTTP metrics configuration
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = Arc::new(metrics);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
