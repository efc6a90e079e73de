use crate::error::{AppError, Result};
use crate::models::{FeatureField, FeatureSpec, FieldDomain, RawInput};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Ordered raw feature values for one case, in FeatureSpec column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self(Array1::from_vec(values))
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

/// Feature vector after scaling with the fitted normalizer parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVector(Array1<f64>);

impl NormalizedVector {
    pub fn new(values: Array1<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

/// Accepted age interval, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: f64,
    pub max: f64,
}

impl AgeRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max <= min {
            return Err(AppError::Configuration(format!(
                "Invalid age range [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.min && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 120.0,
        }
    }
}

/// Assembles feature vectors from questionnaire answers.
///
/// Fields are checked in column order so the first offending field is the one
/// reported back to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureVectorBuilder {
    age_range: AgeRange,
}

impl FeatureVectorBuilder {
    pub fn new(age_range: AgeRange) -> Self {
        Self { age_range }
    }

    pub fn age_range(&self) -> AgeRange {
        self.age_range
    }

    /// Build the ordered vector for `spec` from `raw`
    pub fn build(&self, spec: &FeatureSpec, raw: &RawInput) -> Result<FeatureVector> {
        let mut values = Vec::with_capacity(spec.len());

        for field in &spec.fields {
            let value = raw.get(field.name).ok_or_else(|| AppError::MissingField {
                field: field.name.to_string(),
            })?;
            self.check_domain(field, value)?;
            values.push(value);
        }

        if let Some(unknown) = raw.fields().find(|name| !spec.contains(name)) {
            return Err(AppError::UnknownField {
                field: unknown.to_string(),
            });
        }

        Ok(FeatureVector::from_vec(values))
    }

    fn check_domain(&self, field: &FeatureField, value: f64) -> Result<()> {
        let valid = value.is_finite()
            && match field.domain {
                FieldDomain::Binary => value == 0.0 || value == 1.0,
                FieldDomain::Ordinal { levels } => {
                    value.fract() == 0.0 && value >= 0.0 && value < f64::from(levels)
                }
                FieldDomain::Age => self.age_range.contains(value),
            };

        if valid {
            Ok(())
        } else {
            Err(AppError::OutOfDomain {
                field: field.name.to_string(),
                value,
                expected: self.describe(field.domain),
            })
        }
    }

    fn describe(&self, domain: FieldDomain) -> String {
        match domain {
            FieldDomain::Binary => "0 or 1".to_string(),
            FieldDomain::Ordinal { levels } => {
                format!("an integer from 0 to {}", levels.saturating_sub(1))
            }
            FieldDomain::Age => format!(
                "an age between {} and {}",
                self.age_range.min, self.age_range.max
            ),
        }
    }
}
