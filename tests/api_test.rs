/// HTTP API tests
///
/// Requests go through the full router (middleware included) with
/// `tower::ServiceExt::oneshot`.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::*;
use health_risk_screener::{
    api::{build_router, AppState},
    metrics::{init_metrics, MetricsConfig},
    DISCLAIMER,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (tempfile::TempDir, Router) {
    let (dir, service) = constant_service();
    let app = build_router(AppState::new(Arc::new(service)));
    (dir, app)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["conditions"], json!(["lung", "heart", "breast"]));
    assert_eq!(body["disclaimer"], DISCLAIMER);
}

#[tokio::test]
async fn test_list_conditions() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/v1/conditions")).await;

    assert_eq!(status, StatusCode::OK);
    let specs = body.as_array().unwrap();
    assert_eq!(specs.len(), 3);
    assert_eq!(specs[0]["condition"], "lung");
    assert_eq!(specs[0]["fields"].as_array().unwrap().len(), 8);
    assert_eq!(specs[0]["fields"][0]["name"], "gender");
}

#[tokio::test]
async fn test_get_condition() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/v1/conditions/heart")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fields"][2]["name"], "chest_pain_severity");
    assert_eq!(body["fields"][2]["domain"], json!({"kind": "ordinal", "levels": 4}));
}

#[tokio::test]
async fn test_unknown_condition() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/v1/conditions/kidney")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_screening() {
    let (_dir, app) = test_app();
    let answers = serde_json::to_value(lung_answers()).unwrap();
    let (status, body) = send(app, post_json("/v1/screenings/lung", &answers)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["condition"], "lung");
    assert_eq!(body["label"], "high");
    assert_eq!(body["result"], "High Risk (Probability: 0.82)");
    assert!((body["probability"].as_f64().unwrap() - 0.82).abs() < 1e-9);
    assert!(body["id"].as_str().is_some());
    assert!(body["assessed_at"].as_str().is_some());
}

#[tokio::test]
async fn test_screening_missing_field() {
    let (_dir, app) = test_app();
    let mut answers = heart_answers();
    answers.remove("sex");
    let answers = serde_json::to_value(answers).unwrap();

    let (status, body) = send(app, post_json("/v1/screenings/heart", &answers)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert_eq!(body["error"]["field"], "sex");
}

#[tokio::test]
async fn test_screening_out_of_domain() {
    let (_dir, app) = test_app();
    let answers = serde_json::to_value(breast_answers().with("lump_felt", 2.0)).unwrap();

    let (status, body) = send(app, post_json("/v1/screenings/breast", &answers)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "OUT_OF_DOMAIN");
    assert_eq!(body["error"]["field"], "lump_felt");
}

#[tokio::test]
async fn test_screening_malformed_body() {
    let (_dir, app) = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/screenings/heart")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"age": "forty"}"#))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_screening_unknown_condition() {
    let (_dir, app) = test_app();
    let (status, _) = send(app, post_json("/v1/screenings/liver", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let _ = init_metrics();
    let (_dir, app) = test_app();

    let answers = serde_json::to_value(heart_answers()).unwrap();
    let (status, _) = send(app.clone(), post_json("/v1/screenings/heart", &answers)).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    let metrics = parse_prometheus_output(&text);
    let assessments = metrics
        .get("health_risk_screener_assessments_total")
        .expect("assessments_total should be exported");
    assert!(assessments
        .iter()
        .any(|line| line.contains(r#"condition="heart""#) && line.contains(r#"label="low""#)));
}

#[tokio::test]
async fn test_metrics_disabled() {
    let (_dir, service) = constant_service();
    let app = build_router(
        AppState::new(Arc::new(service)).with_metrics(MetricsConfig::disabled()),
    );

    let (status, _) = send(app, get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_probability_is_opaque() {
    let app = build_router(AppState::new(Arc::new(faulty_service())));
    let answers = serde_json::to_value(lung_answers()).unwrap();

    let (status, body) = send(app, post_json("/v1/screenings/lung", &answers)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INVALID_PROBABILITY");
    assert_eq!(body["error"]["field"], Value::Null);
    assert_eq!(body["error"]["status"], 500);
    let message = body["error"]["message"].as_str().unwrap();
    assert_eq!(message, "Risk assessment is temporarily unavailable");
    assert!(!message.contains("1.3"));
}

#[tokio::test]
async fn test_inference_failure_is_opaque() {
    let app = build_router(AppState::new(Arc::new(faulty_service())));
    let answers = serde_json::to_value(heart_answers()).unwrap();

    let (status, body) = send(app, post_json("/v1/screenings/heart", &answers)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INFERENCE_ERROR");
    assert_eq!(body["error"]["field"], Value::Null);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(!message.contains("heart_patient_model"));
    assert!(!message.contains("non-finite"));
}

#[tokio::test]
async fn test_input_errors_precede_pipeline_faults() {
    let app = build_router(AppState::new(Arc::new(faulty_service())));
    let mut answers = lung_answers();
    answers.remove("age");
    let answers = serde_json::to_value(answers).unwrap();

    let (status, body) = send(app, post_json("/v1/screenings/lung", &answers)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["field"], "age");
}

#[tokio::test]
async fn test_custom_metrics_endpoint() {
    let _ = init_metrics();
    let (_dir, service) = constant_service();
    let metrics = MetricsConfig {
        endpoint: "/prometheus".to_string(),
        ..Default::default()
    };
    let app = build_router(AppState::new(Arc::new(service)).with_metrics(metrics));

    let response = app.clone().oneshot(get("/prometheus")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
