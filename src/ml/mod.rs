//! Risk-assessment pipeline
//!
//! This module turns questionnaire answers into risk labels:
//! - Feature vector assembly and domain validation
//! - Normalization with fitted scaler parameters
//! - Positive-class probability inference
//! - Risk categorization and display formatting
//! - Artifact loading for the three condition pipelines

pub mod artifacts;
pub mod assessor;
pub mod categorizer;
pub mod classifier;
pub mod features;
pub mod models;
pub mod normalizer;
pub mod service;

pub use artifacts::{ArtifactPair, ArtifactSet};
pub use assessor::RiskAssessor;
pub use categorizer::RiskCategorizer;
pub use classifier::{Classifier, LogisticRegressionClassifier, ModelArtifact};
pub use features::{AgeRange, FeatureVector, FeatureVectorBuilder, NormalizedVector};
pub use models::{ModelMetadata, ModelType};
pub use normalizer::{MinMaxScaler, Normalizer, ScalerArtifact, StandardScaler};
pub use service::{AssessorStats, ScreeningService};
