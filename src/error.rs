use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A questionnaire field was not supplied
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// A supplied value lies outside the field's declared domain
    #[error("Value {value} for field '{field}' is out of domain (expected {expected})")]
    OutOfDomain {
        field: String,
        value: f64,
        expected: String,
    },

    /// A supplied field is not part of the questionnaire
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    /// The normalizer rejected the feature vector
    #[error("Normalization error: {0}")]
    Normalization(String),

    /// The classifier failed to produce a probability
    #[error("Inference error: {0}")]
    Inference(String),

    /// The classifier produced a value outside [0, 1]
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),

    /// An artifact could not be loaded at startup
    #[error("Artifact load error ({}): {message}", path.display())]
    ArtifactLoad { path: PathBuf, message: String },

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    pub fn artifact_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AppError::ArtifactLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::OutOfDomain { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Normalization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidProbability(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ArtifactLoad { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::OutOfDomain { .. } => "OUT_OF_DOMAIN",
            AppError::UnknownField { .. } => "UNKNOWN_FIELD",
            AppError::Normalization(_) => "NORMALIZATION_ERROR",
            AppError::Inference(_) => "INFERENCE_ERROR",
            AppError::InvalidProbability(_) => "INVALID_PROBABILITY",
            AppError::ArtifactLoad { .. } => "ARTIFACT_LOAD_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Input errors the caller can fix by changing the questionnaire answers
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            AppError::MissingField { .. }
                | AppError::OutOfDomain { .. }
                | AppError::UnknownField { .. }
                | AppError::Validation(_)
                | AppError::NotFound(_)
        )
    }

    /// The offending field, for input errors
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::MissingField { field }
            | AppError::OutOfDomain { field, .. }
            | AppError::UnknownField { field } => Some(field),
            _ => None,
        }
    }

    /// Message safe to show to a caller.
    ///
    /// Artifact and pipeline faults are reduced to a generic message; the
    /// detail only goes to the operator log.
    pub fn public_message(&self) -> String {
        if self.is_user_correctable() {
            self.to_string()
        } else {
            "Risk assessment is temporarily unavailable".to_string()
        }
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if self.is_user_correctable() {
            tracing::warn!(
                error_code = error_code,
                status_code = status.as_u16(),
                message = %self,
                "Rejected screening request"
            );
        } else {
            tracing::error!(
                error_code = error_code,
                status_code = status.as_u16(),
                message = %self,
                "Request error"
            );
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.public_message(),
                "field": self.field(),
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
