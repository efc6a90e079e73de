//! Common test utilities
//!
//! Helpers for writing artifact directories and for inspecting Prometheus
//! exposition output.

#![allow(dead_code)]

use health_risk_screener::{
    error::{AppError, Result},
    ml::{
        artifacts::{model_path, scaler_path},
        AgeRange, ArtifactPair, ArtifactSet, Classifier, ModelMetadata, ModelType,
        NormalizedVector, ScreeningService, StandardScaler,
    },
    models::{Condition, FeatureSpec, RawInput},
};
use std::sync::Arc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

/// Log-odds of `p`
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Write one scaler/model pair
pub fn write_pair(dir: &Path, condition: Condition, scaler: &Value, model: &Value) {
    fs::write(scaler_path(dir, condition), scaler.to_string()).unwrap();
    fs::write(model_path(dir, condition), model.to_string()).unwrap();
}

/// Write a pair whose output is always `p`: identity scaling, zero weights
pub fn write_constant_pair(dir: &Path, condition: Condition, p: f64) {
    let n = FeatureSpec::for_condition(condition).len();
    write_pair(
        dir,
        condition,
        &json!({"kind": "standard", "mean": vec![0.0; n], "scale": vec![1.0; n]}),
        &json!({
            "kind": "logistic_regression",
            "coefficients": vec![0.0; n],
            "intercept": logit(p),
            "metadata": {"name": format!("{}_model", condition.artifact_stem()), "version": "test"}
        }),
    );
}

/// Write a complete directory: lung 0.82, heart 0.12, breast 0.5
pub fn write_constant_artifacts(dir: &Path) {
    for condition in Condition::iter() {
        let p = match condition {
            Condition::Lung => 0.82,
            Condition::Heart => 0.12,
            Condition::Breast => 0.5,
        };
        write_constant_pair(dir, condition, p);
    }
}

/// Load a service from `dir` with the default age range
pub fn load_service(dir: &Path) -> ScreeningService {
    ScreeningService::new(
        ArtifactSet::load_from_dir(dir).expect("artifacts should load"),
        AgeRange::default(),
    )
    .expect("service should build")
}

/// Service over a fresh temporary directory of constant artifacts
pub fn constant_service() -> (tempfile::TempDir, ScreeningService) {
    let dir = tempfile::tempdir().unwrap();
    write_constant_artifacts(dir.path());
    let service = load_service(dir.path());
    (dir, service)
}

pub fn lung_answers() -> RawInput {
    RawInput::new()
        .with("gender", 1.0)
        .with("age", 55.0)
        .with("smoking", 1.0)
        .with("chronic_disease", 0.0)
        .with("wheezing", 1.0)
        .with("coughing", 1.0)
        .with("shortness_of_breath", 1.0)
        .with("chest_pain", 0.0)
}

pub fn heart_answers() -> RawInput {
    RawInput::new()
        .with("age", 40.0)
        .with("sex", 0.0)
        .with("chest_pain_severity", 0.0)
        .with("exercise_induced_pain", 0.0)
}

pub fn breast_answers() -> RawInput {
    RawInput::new()
        .with("age", 51.0)
        .with("family_history", 1.0)
        .with("pain", 0.0)
        .with("lump_felt", 1.0)
        .with("nipple_discharge", 0.0)
        .with("skin_changes", 0.0)
}

/// Classifier with a scripted outcome
pub struct ScriptedClassifier {
    outcome: std::result::Result<f64, String>,
    metadata: ModelMetadata,
}

impl ScriptedClassifier {
    /// Always returns `p`, even outside [0, 1]
    pub fn returning(p: f64, n_features: usize) -> Self {
        Self {
            outcome: Ok(p),
            metadata: ModelMetadata::new(ModelType::LogisticRegression, n_features),
        }
    }

    /// Always fails with an `Inference` error carrying `detail`
    pub fn failing(detail: &str, n_features: usize) -> Self {
        Self {
            outcome: Err(detail.to_string()),
            metadata: ModelMetadata::new(ModelType::LogisticRegression, n_features),
        }
    }
}

impl Classifier for ScriptedClassifier {
    fn n_features(&self) -> usize {
        self.metadata.n_features
    }

    fn predict_probability(&self, _features: &NormalizedVector) -> Result<f64> {
        self.outcome.clone().map_err(AppError::Inference)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

/// Identity scaling in front of `classifier`
pub fn scripted_pair(condition: Condition, classifier: ScriptedClassifier) -> ArtifactPair {
    let n = FeatureSpec::for_condition(condition).len();
    ArtifactPair::new(
        Arc::new(StandardScaler::new(vec![0.0; n], vec![1.0; n]).unwrap()),
        Arc::new(classifier),
    )
}

/// Service whose lung pipeline yields p = 1.3 and whose heart pipeline fails
/// inference; breast behaves normally at p = 0.5
pub fn faulty_service() -> ScreeningService {
    let set = ArtifactSet::new(
        scripted_pair(Condition::Lung, ScriptedClassifier::returning(1.3, 8)),
        scripted_pair(
            Condition::Heart,
            ScriptedClassifier::failing("non-finite decision value in /srv/models/heart_patient_model.json", 4),
        ),
        scripted_pair(Condition::Breast, ScriptedClassifier::returning(0.5, 6)),
    );
    ScreeningService::new(set, AgeRange::default()).expect("service should build")
}

/// Helper function to parse Prometheus exposition format
/// Returns a map of metric name to its HELP/TYPE and sample lines
pub fn parse_prometheus_output(output: &str) -> HashMap<String, Vec<String>> {
    let mut metrics = HashMap::new();
    let mut current_metric = String::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("# HELP") || line.starts_with("# TYPE") {
            if let Some(name) = line.split_whitespace().nth(2) {
                current_metric = name.to_string();
                metrics
                    .entry(current_metric.clone())
                    .or_insert_with(Vec::new)
                    .push(line.to_string());
            }
        } else if !line.starts_with('#') && !current_metric.is_empty() {
            metrics
                .entry(current_metric.clone())
                .or_insert_with(Vec::new)
                .push(line.to_string());
        }
    }

    metrics
}
