use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Condition screened by one risk pipeline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Condition {
    Lung,
    Heart,
    Breast,
}

impl Condition {
    /// File stem shared by the condition's scaler and model artifacts
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            Condition::Lung => "lung_patient",
            Condition::Heart => "heart_patient",
            Condition::Breast => "breast_patient",
        }
    }

    /// Human-readable name used by the questionnaire
    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Lung => "Lung Cancer",
            Condition::Heart => "Heart Disease",
            Condition::Breast => "Breast Cancer Screening",
        }
    }
}
