//! HTTP request handlers for the Settlement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_settlement, summarize_settlements};
use crate::error::EngineError;
use crate::models::{AuditTrace, ReportFilter, SettlementSummaryEntry, TerminationRequest};

use super::request::{ReportRequest, SimulateRequest};
use super::response::{ApiError, ApiErrorResponse, ReportResponse, SettlementResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settlements/simulate", post(simulate_handler))
        .route("/settlements/report", post(report_handler))
        .with_state(state)
}

/// Handler for POST /settlements/simulate.
///
/// Resolves the employee, loads the rules effective on the termination date
/// and returns the computed settlement.
async fn simulate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement simulation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match simulate(&state, &request, start_time) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %response.employee_id,
                termination_type = %response.termination_type,
                gross_total = %response.lines.gross_total,
                net_total = %response.lines.net_total,
                duration_us = response.audit_trace.duration_us,
                "Settlement simulated"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Settlement simulation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn simulate(
    state: &AppState,
    request: &SimulateRequest,
    start_time: Instant,
) -> Result<SettlementResponse, EngineError> {
    let termination = TerminationRequest::try_from(request)?;
    let employee = state.directory().find(&request.employee_id)?;
    let rules = state.config().rules_for(termination.termination_date)?;

    let calculation = compute_settlement(&employee, &termination, &rules)?;
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    Ok(SettlementResponse {
        calculation_id: Uuid::new_v4(),
        calculated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id,
        termination_type: termination.termination_type,
        termination_date: termination.termination_date,
        notice_indemnified: termination.notice_indemnified,
        notice_period_days: termination.notice_period_days,
        notice_date: termination.notice_date,
        tenure: calculation.tenure.into(),
        lines: (&calculation.breakdown).into(),
        audit_trace: AuditTrace {
            steps: calculation.steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Handler for POST /settlements/report.
async fn report_handler(payload: Result<Json<ReportRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement report");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let filter: ReportFilter = request.filter.into();
    let entries: Vec<SettlementSummaryEntry> =
        request.settlements.into_iter().map(Into::into).collect();

    match summarize_settlements(&entries, &filter) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                submitted = entries.len(),
                included = report.total_settlements,
                total_net = %report.total_net,
                "Settlement report produced"
            );
            json_response(StatusCode::OK, ReportResponse::from(&report))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                submitted = entries.len(),
                error = %err,
                "Settlement report failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Syntactically valid JSON with missing or mistyped fields
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::invalid_input(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryDirectory;
    use crate::config::ConfigLoader;
    use crate::models::{EmployeeFacts, TerminationType};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/standard").expect("Failed to load config");
        let directory = InMemoryDirectory::new(vec![EmployeeFacts {
            id: "emp_001".to_string(),
            base_salary: Decimal::new(800000, 2),
            admission_date: NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
        }]);
        AppState::new(config, directory)
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn simulate_body(termination_type: TerminationType, date: &str) -> String {
        serde_json::json!({
            "employeeId": "emp_001",
            "terminationType": termination_type,
            "terminationDate": date,
            "noticeIndemnified": true
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_simulate_returns_200() {
        let (status, body) = post_json(
            "/settlements/simulate",
            simulate_body(TerminationType::WithoutCause, "2024-01-15"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employeeId"], "emp_001");
        assert_eq!(body["terminationType"], "WITHOUT_CAUSE");
        assert_eq!(body["tenure"]["totalMonths"], 24);
        assert_eq!(body["noticeIndemnity"].as_f64().unwrap(), 8000.0);
        assert_eq!(body["auditTrace"]["steps"].as_array().unwrap().len(), 10);
        assert!(body["calculationId"].is_string());
        assert_eq!(body["engineVersion"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["noticePeriodDays"], 30);
        assert!(body.get("noticeDate").is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, body) = post_json("/settlements/simulate", "{invalid json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_invalid_input() {
        let body = r#"{"employeeId": "emp_001", "terminationType": "WITHOUT_CAUSE"}"#;
        let (status, body) = post_json("/settlements/simulate", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_unknown_employee_returns_404() {
        let body = serde_json::json!({
            "employeeId": "emp_999",
            "terminationType": "WITH_CAUSE",
            "terminationDate": "2024-01-15",
            "noticeIndemnified": false
        });
        let (status, body) = post_json("/settlements/simulate", body.to_string()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_termination_before_admission_returns_400() {
        let (status, body) = post_json(
            "/settlements/simulate",
            simulate_body(TerminationType::WithoutCause, "2019-06-30"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"], "termination_date");
    }

    #[tokio::test]
    async fn test_report_endpoint() {
        let body = serde_json::json!({
            "filter": { "terminationType": "WITHOUT_CAUSE" },
            "settlements": [
                {
                    "employeeId": "emp_001",
                    "terminationType": "WITHOUT_CAUSE",
                    "terminationDate": "2024-01-15",
                    "grossTotal": 50170.67,
                    "netTotal": 47017.33
                },
                {
                    "employeeId": "emp_002",
                    "terminationType": "WITH_CAUSE",
                    "terminationDate": "2024-02-01",
                    "grossTotal": 1000.00,
                    "netTotal": 890.00
                }
            ]
        });
        let (status, body) = post_json("/settlements/report", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalSettlements"], 1);
        assert!((body["totalNet"].as_f64().unwrap() - 47017.33).abs() < 1e-6);
        assert_eq!(body["byType"]["WITHOUT_CAUSE"]["count"], 1);
    }

    #[tokio::test]
    async fn test_report_overflow_returns_400() {
        let huge = Decimal::MAX.to_string();
        let entry = |id: &str| {
            serde_json::json!({
                "employeeId": id,
                "terminationType": "WITHOUT_CAUSE",
                "terminationDate": "2024-01-15",
                "grossTotal": huge,
                "netTotal": "1"
            })
        };
        let body = serde_json::json!({ "settlements": [entry("emp_001"), entry("emp_002")] });
        let (status, body) = post_json("/settlements/report", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"], "settlements");
    }

    #[tokio::test]
    async fn test_huge_other_deductions_returns_400() {
        let body = serde_json::json!({
            "employeeId": "emp_001",
            "terminationType": "WITHOUT_CAUSE",
            "terminationDate": "2024-01-15",
            "noticeIndemnified": true,
            "otherDeductions": Decimal::MAX.to_string()
        });
        let (status, body) = post_json("/settlements/simulate", body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"], "other_deductions");
    }
}
