//! Criterion benchmarks for the screening hot path
//!
//! These benchmarks measure:
//! - Feature vector assembly and validation
//! - A single assessment from a built vector
//! - A full screen (build, normalize, infer, categorize, format)
//! - Metric label lookup on the screening counter

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use health_risk_screener::{
    metrics::ASSESSMENTS_TOTAL,
    ml::{
        AgeRange, ArtifactPair, ArtifactSet, FeatureVectorBuilder, LogisticRegressionClassifier,
        ScreeningService, StandardScaler,
    },
    models::{Condition, FeatureSpec, RawInput},
};
use std::sync::Arc;
use strum::IntoEnumIterator;

fn pair(n: usize) -> ArtifactPair {
    let mean: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
    let scale = vec![0.5; n];
    let coefficients: Vec<f64> = (0..n).map(|i| 0.2 + i as f64 * 0.05).collect();

    ArtifactPair::new(
        Arc::new(StandardScaler::new(mean, scale).expect("valid scaler")),
        Arc::new(LogisticRegressionClassifier::new(coefficients, -0.4).expect("valid model")),
    )
}

fn service() -> ScreeningService {
    let set = ArtifactSet::new(pair(8), pair(4), pair(6));
    ScreeningService::new(set, AgeRange::default()).expect("valid service")
}

fn answers(condition: Condition) -> RawInput {
    FeatureSpec::for_condition(condition)
        .field_names()
        .map(|name| (name, if name == "age" { 52.0 } else { 1.0 }))
        .collect()
}

/// Benchmark feature vector assembly
fn bench_build(c: &mut Criterion) {
    let builder = FeatureVectorBuilder::default();
    let mut group = c.benchmark_group("feature_vector_build");

    for condition in Condition::iter() {
        let spec = FeatureSpec::for_condition(condition);
        let raw = answers(condition);
        group.bench_with_input(BenchmarkId::from_parameter(condition), &raw, |b, raw| {
            b.iter(|| builder.build(black_box(&spec), black_box(raw)))
        });
    }

    group.finish();
}

/// Benchmark assessment of a prebuilt vector
fn bench_assess(c: &mut Criterion) {
    let service = service();
    let assessor = service.assessor(Condition::Lung);
    let features = service
        .builder()
        .build(assessor.spec(), &answers(Condition::Lung))
        .expect("valid answers");

    c.bench_function("assess_lung", |b| {
        b.iter(|| assessor.assess(black_box(&features)))
    });
}

/// Benchmark the full screen, formatting included
fn bench_screen(c: &mut Criterion) {
    let service = service();
    let mut group = c.benchmark_group("screen");

    for condition in Condition::iter() {
        let raw = answers(condition);
        group.bench_with_input(BenchmarkId::from_parameter(condition), &raw, |b, raw| {
            b.iter(|| {
                service
                    .screen(condition, black_box(raw))
                    .map(|assessment| assessment.formatted())
            })
        });
    }

    group.finish();
}

/// Benchmark counter label lookup
fn bench_metric_labels(c: &mut Criterion) {
    c.bench_function("assessments_total_inc", |b| {
        b.iter(|| {
            ASSESSMENTS_TOTAL
                .with_label_values(black_box(&["heart", "low"]))
                .inc()
        })
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_assess,
    bench_screen,
    bench_metric_labels
);
criterion_main!(benches);
