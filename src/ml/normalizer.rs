use crate::error::{AppError, Result};
use crate::ml::features::{FeatureVector, NormalizedVector};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for fitted feature normalizers
pub trait Normalizer: Send + Sync {
    /// Dimensionality the normalizer was fit with
    fn n_features(&self) -> usize;

    /// Scale a raw feature vector
    fn transform(&self, features: &FeatureVector) -> Result<NormalizedVector>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Standardization with fitted per-column mean and scale
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Zero scales are replaced by 1, matching constant columns at fit time
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        check_parameters("mean", &mean, "scale", &scale)?;

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();

        Ok(Self {
            mean: Array1::from_vec(mean),
            scale: Array1::from_vec(scale),
        })
    }
}

impl Normalizer for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &FeatureVector) -> Result<NormalizedVector> {
        check_shape(self.n_features(), features)?;
        let scaled = (features.values() - &self.mean) / &self.scale;
        Ok(NormalizedVector::new(scaled))
    }

    fn name(&self) -> &str {
        "standard_scaler"
    }
}

/// Min-max scaling into `feature_range`
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    data_min: Array1<f64>,
    data_range: Array1<f64>,
    feature_range: (f64, f64),
}

impl MinMaxScaler {
    pub fn new(data_min: Vec<f64>, data_max: Vec<f64>, feature_range: (f64, f64)) -> Result<Self> {
        check_parameters("data_min", &data_min, "data_max", &data_max)?;

        let (low, high) = feature_range;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(AppError::Validation(format!(
                "Invalid feature range ({}, {})",
                low, high
            )));
        }

        let data_range = data_min
            .iter()
            .zip(data_max.iter())
            .map(|(min, max)| {
                let span = max - min;
                if span == 0.0 {
                    1.0
                } else {
                    span
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            data_min: Array1::from_vec(data_min),
            data_range: Array1::from_vec(data_range),
            feature_range,
        })
    }
}

impl Normalizer for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.data_min.len()
    }

    fn transform(&self, features: &FeatureVector) -> Result<NormalizedVector> {
        check_shape(self.n_features(), features)?;
        let (low, high) = self.feature_range;
        let unit = (features.values() - &self.data_min) / &self.data_range;
        Ok(NormalizedVector::new(unit * (high - low) + low))
    }

    fn name(&self) -> &str {
        "min_max_scaler"
    }
}

/// Serialized normalizer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard {
        mean: Vec<f64>,
        scale: Vec<f64>,
    },
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
}

impl ScalerArtifact {
    pub fn into_normalizer(self) -> Result<Arc<dyn Normalizer>> {
        Ok(match self {
            ScalerArtifact::Standard { mean, scale } => Arc::new(StandardScaler::new(mean, scale)?),
            ScalerArtifact::MinMax {
                data_min,
                data_max,
                feature_range,
            } => Arc::new(MinMaxScaler::new(data_min, data_max, feature_range)?),
        })
    }
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

fn check_shape(expected: usize, features: &FeatureVector) -> Result<()> {
    if features.len() != expected {
        return Err(AppError::Normalization(format!(
            "expected {} features, got {}",
            expected,
            features.len()
        )));
    }
    Ok(())
}

fn check_parameters(a_name: &str, a: &[f64], b_name: &str, b: &[f64]) -> Result<()> {
    if a.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", a_name)));
    }
    if a.len() != b.len() {
        return Err(AppError::Validation(format!(
            "{} has {} entries but {} has {}",
            a_name,
            a.len(),
            b_name,
            b.len()
        )));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(AppError::Validation(format!(
            "{} and {} must be finite",
            a_name, b_name
        )));
    }
    Ok(())
}
