use crate::error::{AppError, Result};
use crate::ml::features::AgeRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Fitted artifact location
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Questionnaire validation bounds
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("HRS_CONFIG_PATH").unwrap_or_else(|_| "config/local.toml".to_string());

        let config: Config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: HRS_)
            .add_source(
                config::Environment::with_prefix("HRS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.validation
            .validate()
            .map_err(|e| AppError::Configuration(format!("validation: {}", e)))?;

        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "server.port must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding `<condition>_patient_{scaler,model}.json`
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_bounds"))]
pub struct ValidationConfig {
    /// Youngest accepted age (inclusive)
    #[serde(default = "default_min_age")]
    #[validate(range(min = 0.0))]
    pub min_age: f64,

    /// Oldest accepted age (inclusive)
    #[serde(default = "default_max_age")]
    #[validate(range(max = 150.0))]
    pub max_age: f64,
}

impl ValidationConfig {
    pub fn age_range(&self) -> Result<AgeRange> {
        AgeRange::new(self.min_age, self.max_age)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

fn validate_age_bounds(config: &ValidationConfig) -> std::result::Result<(), ValidationError> {
    if config.max_age > config.min_age {
        Ok(())
    } else {
        Err(ValidationError::new("max_age_not_above_min_age"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable Prometheus metrics
    #[serde(default = "default_true")]
    pub prometheus_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
            prometheus_enabled: true,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_min_age() -> f64 {
    0.0
}

fn default_max_age() -> f64 {
    120.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "health-risk-screener".to_string()
}

fn default_true() -> bool {
    true
}
