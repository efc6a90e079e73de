use crate::error::{AppError, Result};
use crate::ml::classifier::{Classifier, ModelArtifact};
use crate::ml::normalizer::{Normalizer, ScalerArtifact};
use crate::models::{Condition, FeatureSpec};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// A fitted normalizer and the classifier trained on its output
#[derive(Clone)]
pub struct ArtifactPair {
    pub normalizer: Arc<dyn Normalizer>,
    pub classifier: Arc<dyn Classifier>,
}

impl ArtifactPair {
    pub fn new(normalizer: Arc<dyn Normalizer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            normalizer,
            classifier,
        }
    }
}

/// The six artifacts the screener needs, one pair per condition.
///
/// A set is either complete or not constructed at all.
#[derive(Clone)]
pub struct ArtifactSet {
    lung: ArtifactPair,
    heart: ArtifactPair,
    breast: ArtifactPair,
}

impl ArtifactSet {
    pub fn new(lung: ArtifactPair, heart: ArtifactPair, breast: ArtifactPair) -> Self {
        Self { lung, heart, breast }
    }

    pub fn get(&self, condition: Condition) -> &ArtifactPair {
        match condition {
            Condition::Lung => &self.lung,
            Condition::Heart => &self.heart,
            Condition::Breast => &self.breast,
        }
    }

    /// Load `<condition>_patient_scaler.json` and `<condition>_patient_model.json`
    /// for every condition from `dir`
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(AppError::artifact_load(dir, "artifact directory not found"));
        }

        let mut pairs = Condition::iter()
            .map(|condition| load_pair(dir, condition))
            .collect::<Result<Vec<_>>>()?
            .into_iter();

        match (pairs.next(), pairs.next(), pairs.next()) {
            (Some(lung), Some(heart), Some(breast)) => Ok(Self::new(lung, heart, breast)),
            _ => Err(AppError::artifact_load(dir, "incomplete artifact set")),
        }
    }
}

pub fn scaler_path(dir: &Path, condition: Condition) -> PathBuf {
    dir.join(format!("{}_scaler.json", condition.artifact_stem()))
}

pub fn model_path(dir: &Path, condition: Condition) -> PathBuf {
    dir.join(format!("{}_model.json", condition.artifact_stem()))
}

fn load_pair(dir: &Path, condition: Condition) -> Result<ArtifactPair> {
    let scaler_path = scaler_path(dir, condition);
    let model_path = model_path(dir, condition);

    let normalizer = read_artifact::<ScalerArtifact>(&scaler_path)?
        .into_normalizer()
        .map_err(|e| AppError::artifact_load(&scaler_path, e.to_string()))?;

    let classifier = read_artifact::<ModelArtifact>(&model_path)?
        .into_classifier()
        .map_err(|e| AppError::artifact_load(&model_path, e.to_string()))?;

    let expected = FeatureSpec::for_condition(condition).len();
    if normalizer.n_features() != expected {
        return Err(AppError::artifact_load(
            &scaler_path,
            format!(
                "fitted on {} features, {} questionnaire has {}",
                normalizer.n_features(),
                condition,
                expected
            ),
        ));
    }
    if classifier.n_features() != expected {
        return Err(AppError::artifact_load(
            &model_path,
            format!(
                "fitted on {} features, {} questionnaire has {}",
                classifier.n_features(),
                condition,
                expected
            ),
        ));
    }

    tracing::info!(
        condition = %condition,
        normalizer = normalizer.name(),
        model = %classifier.metadata().name,
        version = %classifier.metadata().version,
        n_features = expected,
        "Loaded artifacts"
    );

    Ok(ArtifactPair::new(normalizer, classifier))
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| AppError::artifact_load(path, e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| AppError::artifact_load(path, e.to_string()))
}
