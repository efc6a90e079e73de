use crate::error::{AppError, Result};
use crate::ml::artifacts::ArtifactPair;
use crate::ml::categorizer::RiskCategorizer;
use crate::ml::features::{FeatureVector, FeatureVectorBuilder};
use crate::models::{Condition, FeatureSpec, Probability, RawInput, RiskAssessment};

/// Normalize, infer and categorize for one condition
#[derive(Clone)]
pub struct RiskAssessor {
    spec: FeatureSpec,
    artifacts: ArtifactPair,
}

impl RiskAssessor {
    /// Pair a questionnaire with its fitted artifacts.
    ///
    /// Fails when the artifacts were fit with a different number of columns
    /// than the questionnaire declares.
    pub fn new(spec: FeatureSpec, artifacts: ArtifactPair) -> Result<Self> {
        let expected = spec.len();
        let normalizer = artifacts.normalizer.n_features();
        let classifier = artifacts.classifier.n_features();

        if normalizer != expected || classifier != expected {
            return Err(AppError::artifact_load(
                spec.condition.artifact_stem(),
                format!(
                    "{} artifacts do not match the questionnaire: {} fields, normalizer expects {}, classifier expects {}",
                    spec.condition, expected, normalizer, classifier
                ),
            ));
        }

        Ok(Self { spec, artifacts })
    }

    pub fn condition(&self) -> Condition {
        self.spec.condition
    }

    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }

    pub fn artifacts(&self) -> &ArtifactPair {
        &self.artifacts
    }

    /// Run the pipeline on an assembled feature vector
    pub fn assess(&self, features: &FeatureVector) -> Result<RiskAssessment> {
        let normalized = self
            .artifacts
            .normalizer
            .transform(features)
            .map_err(|e| match e {
                AppError::Normalization(_) => e,
                other => AppError::Normalization(other.to_string()),
            })?;

        let p = self
            .artifacts
            .classifier
            .predict_probability(&normalized)
            .map_err(|e| match e {
                AppError::Inference(_) => e,
                other => AppError::Inference(other.to_string()),
            })?;

        let probability = Probability::new(p)?;
        let label = RiskCategorizer::label_for(probability);

        tracing::debug!(
            condition = %self.spec.condition,
            probability = p,
            label = %label,
            "Risk assessed"
        );

        Ok(RiskAssessment { label, probability })
    }

    /// Build the feature vector from questionnaire answers, then assess
    pub fn assess_raw(
        &self,
        builder: &FeatureVectorBuilder,
        raw: &RawInput,
    ) -> Result<RiskAssessment> {
        let features = builder.build(&self.spec, raw)?;
        self.assess(&features)
    }
}

impl std::fmt::Debug for RiskAssessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskAssessor")
            .field("condition", &self.spec.condition)
            .field("n_features", &self.spec.len())
            .field("normalizer", &self.artifacts.normalizer.name())
            .field("classifier", &self.artifacts.classifier.metadata().name)
            .finish()
    }
}
