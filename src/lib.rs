//! Health risk screening for lung cancer, heart disease and breast cancer.
//!
//! Questionnaire answers are assembled into an ordered feature vector,
//! normalized with a fitted scaler, scored by a fitted binary classifier, and
//! reported as a risk tier with the positive-class probability:
//!
//! ```text
//! High Risk (Probability: 0.82)
//! ```
//!
//! Risk screening only. Not a medical diagnosis.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ml;
pub mod models;
pub mod telemetry;

pub use error::{AppError, Result};

/// Shown alongside every screening result
pub const DISCLAIMER: &str = "Risk screening only. Not a medical diagnosis.";
