use serde::{Deserialize, Serialize};

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    /// Model name
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Model version
    #[serde(default = "default_model_version")]
    pub version: String,

    /// Model type
    #[serde(default)]
    pub model_type: ModelType,

    /// Training timestamp, if the exporter recorded one
    #[serde(default)]
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Number of features
    #[serde(default)]
    pub n_features: usize,
}

impl ModelMetadata {
    pub fn new(model_type: ModelType, n_features: usize) -> Self {
        Self {
            name: model_type.to_string(),
            version: default_model_version(),
            model_type,
            trained_at: None,
            n_features,
        }
    }
}

/// Model type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Logistic regression
    #[default]
    LogisticRegression,
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelType::LogisticRegression => write!(f, "Logistic Regression"),
        }
    }
}

fn default_model_name() -> String {
    ModelType::default().to_string()
}

fn default_model_version() -> String {
    "1.0".to_string()
}
