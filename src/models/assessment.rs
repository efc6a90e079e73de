use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Ordinal risk category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    #[strum(serialize = "Low Risk")]
    Low,
    #[strum(serialize = "Medium Risk")]
    Medium,
    #[strum(serialize = "High Risk")]
    High,
}

impl RiskLabel {
    /// Lowercase label used for metrics
    pub fn as_metric_label(&self) -> &'static str {
        match self {
            RiskLabel::Low => "low",
            RiskLabel::Medium => "medium",
            RiskLabel::High => "high",
        }
    }
}

/// Positive-class probability in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Rejects NaN and anything outside [0, 1] without clamping
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::InvalidProbability(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Two fraction digits, `.` as decimal point
impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Result of one screening
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    pub probability: Probability,
}

impl RiskAssessment {
    /// `"<Label> (Probability: <p>)"`
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Probability: {})", self.label, self.probability)
    }
}
