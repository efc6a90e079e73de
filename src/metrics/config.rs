//! Configuration for HTTP metrics collection
use serde::{Deserialize, Serialize};

/// Configuration for metrics collection and export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable metrics collection
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Endpoint path for metrics export
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Enable histogram metrics
    #[serde(default = "default_enabled")]
    pub enable_histograms: bool,

    /// Paths to exclude from HTTP metrics
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            enable_histograms: default_enabled(),
            excluded_paths: vec![
                "/health".to_string(),
                "/health/live".to_string(),
                "/health/ready".to_string(),
                default_endpoint(),
            ],
        }
    }
}

impl MetricsConfig {
    /// Configuration with collection turned off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check if a path should be excluded from metrics
    pub fn is_path_excluded(&self, path: &str) -> bool {
        self.excluded_paths.iter().any(|p| p == path)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "/metrics".to_string()
}
