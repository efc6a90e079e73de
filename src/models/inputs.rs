use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Questionnaire answers keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(BTreeMap<String, f64>);

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<f64> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RawInput {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Lung cancer questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LungInputs {
    pub gender: u8,
    pub age: f64,
    pub smoking: u8,
    pub chronic_disease: u8,
    pub wheezing: u8,
    pub coughing: u8,
    pub shortness_of_breath: u8,
    pub chest_pain: u8,
}

impl From<&LungInputs> for RawInput {
    fn from(inputs: &LungInputs) -> Self {
        RawInput::new()
            .with("gender", f64::from(inputs.gender))
            .with("age", inputs.age)
            .with("smoking", f64::from(inputs.smoking))
            .with("chronic_disease", f64::from(inputs.chronic_disease))
            .with("wheezing", f64::from(inputs.wheezing))
            .with("coughing", f64::from(inputs.coughing))
            .with("shortness_of_breath", f64::from(inputs.shortness_of_breath))
            .with("chest_pain", f64::from(inputs.chest_pain))
    }
}

/// Heart disease questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartInputs {
    pub age: f64,
    pub sex: u8,
    pub chest_pain_severity: u8,
    pub exercise_induced_pain: u8,
}

impl From<&HeartInputs> for RawInput {
    fn from(inputs: &HeartInputs) -> Self {
        RawInput::new()
            .with("age", inputs.age)
            .with("sex", f64::from(inputs.sex))
            .with("chest_pain_severity", f64::from(inputs.chest_pain_severity))
            .with("exercise_induced_pain", f64::from(inputs.exercise_induced_pain))
    }
}

/// Breast cancer questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreastInputs {
    pub age: f64,
    pub family_history: u8,
    pub pain: u8,
    pub lump_felt: u8,
    pub nipple_discharge: u8,
    pub skin_changes: u8,
}

impl From<&BreastInputs> for RawInput {
    fn from(inputs: &BreastInputs) -> Self {
        RawInput::new()
            .with("age", inputs.age)
            .with("family_history", f64::from(inputs.family_history))
            .with("pain", f64::from(inputs.pain))
            .with("lump_felt", f64::from(inputs.lump_felt))
            .with("nipple_discharge", f64::from(inputs.nipple_discharge))
            .with("skin_changes", f64::from(inputs.skin_changes))
    }
}
