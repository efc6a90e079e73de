use crate::error::{AppError, Result};
use crate::ml::features::NormalizedVector;
use crate::ml::models::{ModelMetadata, ModelType};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for binary classifiers
pub trait Classifier: Send + Sync {
    /// Dimensionality the model was fit with
    fn n_features(&self) -> usize;

    /// Probability mass of the positive ("condition present") class
    fn predict_probability(&self, features: &NormalizedVector) -> Result<f64>;

    /// Get model metadata
    fn metadata(&self) -> &ModelMetadata;

    /// Get model type
    fn model_type(&self) -> ModelType {
        self.metadata().model_type
    }
}

/// Logistic Regression Classifier
#[derive(Debug, Clone)]
pub struct LogisticRegressionClassifier {
    /// Model metadata
    metadata: ModelMetadata,

    /// Model weights
    coefficients: Array1<f64>,

    /// Model bias
    intercept: f64,
}

impl LogisticRegressionClassifier {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(AppError::Validation(
                "coefficients must not be empty".to_string(),
            ));
        }
        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(AppError::Validation(
                "coefficients and intercept must be finite".to_string(),
            ));
        }

        let metadata = ModelMetadata::new(ModelType::LogisticRegression, coefficients.len());

        Ok(Self {
            metadata,
            coefficients: Array1::from_vec(coefficients),
            intercept,
        })
    }

    pub fn with_metadata(mut self, mut metadata: ModelMetadata) -> Self {
        metadata.model_type = ModelType::LogisticRegression;
        metadata.n_features = self.coefficients.len();
        self.metadata = metadata;
        self
    }

    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }
}

impl Classifier for LogisticRegressionClassifier {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_probability(&self, features: &NormalizedVector) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(AppError::Inference(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let z = self.coefficients.dot(features.values()) + self.intercept;
        if !z.is_finite() {
            return Err(AppError::Inference(format!(
                "decision function is not finite ({})",
                z
            )));
        }

        Ok(Self::sigmoid(z))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Serialized classifier parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        metadata: Option<ModelMetadata>,
    },
}

impl ModelArtifact {
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>> {
        match self {
            ModelArtifact::LogisticRegression {
                coefficients,
                intercept,
                metadata,
            } => {
                let mut classifier = LogisticRegressionClassifier::new(coefficients, intercept)?;
                if let Some(metadata) = metadata {
                    classifier = classifier.with_metadata(metadata);
                }
                Ok(Arc::new(classifier))
            }
        }
    }
}
