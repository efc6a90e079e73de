use crate::error::Result;
use crate::models::{Probability, RiskLabel};

/// Maps a positive-class probability onto a risk label.
///
/// Intervals are half-open with the lower bound inclusive:
/// `[0.0, 0.3)` low, `[0.3, 0.7)` medium, `[0.7, 1.0]` high.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskCategorizer;

impl RiskCategorizer {
    pub const MEDIUM_THRESHOLD: f64 = 0.3;
    pub const HIGH_THRESHOLD: f64 = 0.7;

    /// Categorize a raw probability, rejecting values outside [0, 1]
    pub fn categorize(p: f64) -> Result<RiskLabel> {
        Probability::new(p).map(Self::label_for)
    }

    pub fn label_for(probability: Probability) -> RiskLabel {
        let p = probability.value();
        if p < Self::MEDIUM_THRESHOLD {
            RiskLabel::Low
        } else if p < Self::HIGH_THRESHOLD {
            RiskLabel::Medium
        } else {
            RiskLabel::High
        }
    }
}
