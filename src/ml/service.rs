use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metrics::{ASSESSMENTS_TOTAL, ASSESSMENT_DURATION_SECONDS, ASSESSMENT_ERRORS_TOTAL};
use crate::ml::artifacts::ArtifactSet;
use crate::ml::assessor::RiskAssessor;
use crate::ml::features::{AgeRange, FeatureVectorBuilder};
use crate::models::{
    BreastInputs, Condition, FeatureSpec, HeartInputs, LungInputs, RawInput, RiskAssessment,
};
use serde::Serialize;
use std::time::Instant;

/// Screening service: one configured assessor per condition.
///
/// Holds only immutable state, so a single instance can be shared across
/// request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScreeningService {
    builder: FeatureVectorBuilder,
    lung: RiskAssessor,
    heart: RiskAssessor,
    breast: RiskAssessor,
}

impl ScreeningService {
    /// Create the service from a complete artifact set
    pub fn new(artifacts: ArtifactSet, age_range: AgeRange) -> Result<Self> {
        let assessor = |condition: Condition| {
            RiskAssessor::new(
                FeatureSpec::for_condition(condition),
                artifacts.get(condition).clone(),
            )
        };

        Ok(Self {
            builder: FeatureVectorBuilder::new(age_range),
            lung: assessor(Condition::Lung)?,
            heart: assessor(Condition::Heart)?,
            breast: assessor(Condition::Breast)?,
        })
    }

    /// Load all artifacts from the configured directory
    pub fn from_config(config: &Config) -> Result<Self> {
        let artifacts = ArtifactSet::load_from_dir(&config.artifacts.dir)?;
        Self::new(artifacts, config.validation.age_range()?)
    }

    pub fn assessor(&self, condition: Condition) -> &RiskAssessor {
        match condition {
            Condition::Lung => &self.lung,
            Condition::Heart => &self.heart,
            Condition::Breast => &self.breast,
        }
    }

    pub fn spec(&self, condition: Condition) -> &FeatureSpec {
        self.assessor(condition).spec()
    }

    pub fn builder(&self) -> &FeatureVectorBuilder {
        &self.builder
    }

    /// Screen one questionnaire for `condition`
    pub fn screen(&self, condition: Condition, raw: &RawInput) -> Result<RiskAssessment> {
        let start = Instant::now();
        let result = self.assessor(condition).assess_raw(&self.builder, raw);
        let condition_label = condition.to_string();

        ASSESSMENT_DURATION_SECONDS
            .with_label_values(&[&condition_label])
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(assessment) => {
                ASSESSMENTS_TOTAL
                    .with_label_values(&[&condition_label, assessment.label.as_metric_label()])
                    .inc();
                tracing::info!(
                    condition = %condition,
                    label = %assessment.label,
                    probability = assessment.probability.value(),
                    "Screening completed"
                );
            }
            Err(e) => {
                ASSESSMENT_ERRORS_TOTAL
                    .with_label_values(&[&condition_label, e.error_code()])
                    .inc();
                log_failure(condition, e);
            }
        }

        result
    }

    /// Lung cancer screening, formatted for display
    pub fn screen_lung(&self, inputs: &LungInputs) -> Result<String> {
        self.screen(Condition::Lung, &RawInput::from(inputs))
            .map(|a| a.formatted())
    }

    /// Heart disease screening, formatted for display
    pub fn screen_heart(&self, inputs: &HeartInputs) -> Result<String> {
        self.screen(Condition::Heart, &RawInput::from(inputs))
            .map(|a| a.formatted())
    }

    /// Breast cancer screening, formatted for display
    pub fn screen_breast(&self, inputs: &BreastInputs) -> Result<String> {
        self.screen(Condition::Breast, &RawInput::from(inputs))
            .map(|a| a.formatted())
    }

    /// Summary of the loaded artifacts
    pub fn stats(&self) -> Vec<AssessorStats> {
        [&self.lung, &self.heart, &self.breast]
            .into_iter()
            .map(|assessor| {
                let metadata = assessor.artifacts().classifier.metadata();
                AssessorStats {
                    condition: assessor.condition(),
                    n_features: assessor.spec().len(),
                    normalizer: assessor.artifacts().normalizer.name().to_string(),
                    model_name: metadata.name.clone(),
                    model_version: metadata.version.clone(),
                }
            })
            .collect()
    }
}

fn log_failure(condition: Condition, error: &AppError) {
    if error.is_user_correctable() {
        tracing::warn!(
            condition = %condition,
            error_code = error.error_code(),
            field = error.field(),
            "Screening input rejected: {}",
            error
        );
    } else {
        tracing::error!(
            condition = %condition,
            error_code = error.error_code(),
            "Screening pipeline fault: {}",
            error
        );
    }
}

/// Loaded assessor summary
#[derive(Debug, Clone, Serialize)]
pub struct AssessorStats {
    pub condition: Condition,
    pub n_features: usize,
    pub normalizer: String,
    pub model_name: String,
    pub model_version: String,
}
