use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::gather_metrics;
use crate::models::*;
use crate::DISCLAIMER;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;
use uuid::Uuid;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        conditions: Condition::iter().collect(),
        disclaimer: DISCLAIMER,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub conditions: Vec<Condition>,
    pub disclaimer: &'static str,
}

/// List every questionnaire
pub async fn list_conditions(State(state): State<AppState>) -> Result<Json<Vec<FeatureSpec>>> {
    Ok(Json(
        Condition::iter()
            .map(|c| state.service.spec(c).clone())
            .collect(),
    ))
}

/// Get the questionnaire for one condition
pub async fn get_condition(
    State(state): State<AppState>,
    Path(condition): Path<String>,
) -> Result<Json<FeatureSpec>> {
    let condition = parse_condition(&condition)?;
    Ok(Json(state.service.spec(condition).clone()))
}

/// Screen one questionnaire
pub async fn screen(
    State(state): State<AppState>,
    Path(condition): Path<String>,
    body: std::result::Result<Json<RawInput>, JsonRejection>,
) -> Result<Json<ScreeningResponse>> {
    let condition = parse_condition(&condition)?;
    let Json(raw) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let assessment = state.service.screen(condition, &raw)?;

    Ok(Json(ScreeningResponse {
        id: Uuid::new_v4(),
        condition,
        label: assessment.label,
        probability: assessment.probability.value(),
        result: assessment.formatted(),
        assessed_at: Utc::now(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub id: Uuid,
    pub condition: Condition,
    pub label: RiskLabel,
    pub probability: f64,
    pub result: String,
    pub assessed_at: DateTime<Utc>,
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    if !state.metrics.enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
        .into_response()
}

fn parse_condition(value: &str) -> Result<Condition> {
    value
        .parse::<Condition>()
        .map_err(|_| AppError::NotFound(format!("Unknown condition: {}", value)))
}
