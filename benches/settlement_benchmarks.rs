//! Performance benchmarks for the Settlement Engine.
//!
//! Covers the bare calculator, a full HTTP simulation round trip, and a
//! report over a large batch of settlements.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use settlement_engine::api::{AppState, InMemoryDirectory, create_router};
use settlement_engine::calculation::{compute, compute_settlement, summarize_settlements};
use settlement_engine::config::{ConfigLoader, SettlementRules};
use settlement_engine::models::{
    EmployeeFacts, ReportFilter, SettlementSummaryEntry, TerminationRequest, TerminationType,
};

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/standard").expect("Failed to load config");
    let directory =
        InMemoryDirectory::from_yaml_file("./config/employees.yaml").expect("Failed to load roster");
    AppState::new(config, directory)
}

fn sample_inputs() -> (EmployeeFacts, TerminationRequest) {
    let employee = EmployeeFacts::new(
        "emp_bench_001",
        Decimal::new(800000, 2),
        NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
    )
    .unwrap();
    let request = TerminationRequest::new(
        TerminationType::WithoutCause,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        true,
    );
    (employee, request)
}

/// Benchmark: bare calculator with and without the audit trail.
fn bench_calculator(c: &mut Criterion) {
    let (employee, request) = sample_inputs();
    let rules = SettlementRules::default();

    c.bench_function("compute", |b| {
        b.iter(|| black_box(compute(black_box(&employee), black_box(&request))))
    });

    c.bench_function("compute_settlement", |b| {
        b.iter(|| {
            black_box(compute_settlement(
                black_box(&employee),
                black_box(&request),
                black_box(&rules),
            ))
        })
    });
}

/// Benchmark: POST /settlements/simulate through the router.
fn bench_simulate_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employeeId": "emp_001",
        "terminationType": "WITHOUT_CAUSE",
        "terminationDate": "2024-01-15",
        "noticeIndemnified": true
    })
    .to_string();

    c.bench_function("simulate_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/settlements/simulate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: reports over growing batches of settlements.
fn bench_report(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut group = c.benchmark_group("report");

    for size in [100usize, 1000, 10_000] {
        let entries: Vec<SettlementSummaryEntry> = (0..size)
            .map(|i| SettlementSummaryEntry {
                employee_id: format!("emp_{:05}", i),
                termination_type: TerminationType::ALL[i % TerminationType::ALL.len()],
                termination_date: start + Duration::days((i % 1500) as i64),
                gross_total: Decimal::new(1_000_000 + i as i64, 2),
                net_total: Decimal::new(890_000 + i as i64, 2),
            })
            .collect();
        let filter = ReportFilter {
            from: Some(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()),
            ..ReportFilter::default()
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(summarize_settlements(black_box(entries), &filter)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculator, bench_simulate_request, bench_report);
criterion_main!(benches);
