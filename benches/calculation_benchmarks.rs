//! Performance benchmarks for the Shift Engine.
//!
//! Covers the hot paths a scheduling UI hits on every edit and the monthly
//! payroll run:
//! - Conflict check through the HTTP router
//! - Conflict evaluation against growing schedule snapshots
//! - Monthly payroll for a 100-employee roster
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{DateTime, Duration, NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use shift_engine::api::{AppState, create_router};
use shift_engine::calculation::{
    CandidateRequest, ConflictContext, compute_monthly_payroll, evaluate_conflicts,
};
use shift_engine::config::ConfigLoader;
use shift_engine::models::{
    Employee, PayrollMonth, ScheduleRequest, ScheduleStatus, ShiftCategory, ShiftDefinition,
    StorePolicy,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/retail").expect("Failed to load config");
    AppState::new(config)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn shift_catalog() -> Vec<ShiftDefinition> {
    [
        ("open", "07:00", "15:00", ShiftCategory::FullTime),
        ("close", "15:00", "23:00", ShiftCategory::FullTime),
        ("night", "22:30", "06:30", ShiftCategory::FullTime),
        ("flex", "09:00", "22:00", ShiftCategory::PartTime),
    ]
    .into_iter()
    .map(|(id, start, end, category)| ShiftDefinition {
        id: id.to_string(),
        name: id.to_string(),
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        duration: None,
        category,
        is_active: true,
        capacity: None,
    })
    .collect()
}

/// Generates `count` schedules spread over 20 employees and the month of March.
fn create_schedules(count: usize, status: ScheduleStatus) -> Vec<ScheduleRequest> {
    let shift_ids = ["open", "close", "night"];
    (0..count)
        .map(|i| {
            let employee = format!("emp_{:03}", i % 20);
            ScheduleRequest {
                id: format!("sch_{:05}", i),
                store_id: "store_gangnam".to_string(),
                employee_id: employee.clone(),
                shift_id: shift_ids[i % shift_ids.len()].to_string(),
                date: base_date() + Duration::days((i / 20 % 31) as i64),
                status,
                start_time: None,
                end_time: None,
                requested_by: employee.clone(),
                created_by: employee,
                assigned_by: None,
                approved_by: None,
                created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
                updated_at: None,
            }
        })
        .collect()
}

fn create_candidate() -> CandidateRequest {
    CandidateRequest {
        employee_id: "emp_007".to_string(),
        store_id: "store_gangnam".to_string(),
        shift_id: "open".to_string(),
        date: base_date() + Duration::days(14),
        start_time: None,
        end_time: None,
    }
}

/// Benchmark: Single conflict check through the router.
fn bench_conflict_check_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "candidate": create_candidate(),
        "today": base_date(),
        "schedules": create_schedules(200, ScheduleStatus::Approved),
        "shifts": shift_catalog()
    })
    .to_string();

    c.bench_function("conflict_check_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/conflicts")
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

/// Benchmark: Conflict evaluation as the snapshot grows.
fn bench_conflict_scaling(c: &mut Criterion) {
    let shifts = shift_catalog();
    let candidate = create_candidate();
    let policy = StorePolicy {
        max_employees_per_shift: Some(5),
        max_hours_per_week: Some(Decimal::new(52, 0)),
        min_rest_days_per_month: Some(8),
        min_rest_hours: Some(Decimal::new(11, 0)),
        ..StorePolicy::unrestricted("store_gangnam")
    };

    let mut group = c.benchmark_group("conflict_scaling");

    for count in [10, 100, 1000, 5000] {
        let schedules = create_schedules(count, ScheduleStatus::Approved);
        let context = ConflictContext {
            today: base_date(),
            schedules: &schedules,
            shifts: &shifts,
            policy: Some(&policy),
            editing_schedule_id: None,
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("schedules", count), &count, |b, _| {
            b.iter(|| black_box(evaluate_conflicts(&candidate, &context).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark: Monthly payroll for 100 employees.
fn bench_monthly_payroll(c: &mut Criterion) {
    let shifts = shift_catalog();
    let month = PayrollMonth::new(2026, 3).unwrap();
    let employees: Vec<Employee> = (0..100)
        .map(|i| Employee {
            id: format!("emp_{:03}", i % 20),
            name: format!("Employee {}", i),
            hourly_rate: Decimal::new(10_030 + i, 0),
            store_id: Some("store_gangnam".to_string()),
        })
        .collect();
    let schedules = create_schedules(2000, ScheduleStatus::Completed);

    let mut group = c.benchmark_group("payroll");
    group.throughput(Throughput::Elements(employees.len() as u64));
    group.sample_size(20);

    group.bench_function("monthly_100_employees", |b| {
        b.iter(|| black_box(compute_monthly_payroll(&employees, &schedules, &shifts, month).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_conflict_check_http,
    bench_conflict_scaling,
    bench_monthly_payroll,
);
criterion_main!(benches);
