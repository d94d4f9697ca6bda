//! Response types for the Settlement Engine API.
//!
//! This module defines the settlement and report response bodies, the error
//! response structure, and the mapping from engine errors to HTTP statuses.
//! Monetary amounts are rounded to two places and written as JSON numbers.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    AuditTrace, ReportFilter, SettlementBreakdown, SettlementReport, SettlementSummaryEntry,
    Tenure, TerminationType, TypeTotals, round_money,
};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid input error response.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new("INVALID_INPUT", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("INVALID_INPUT", message, field),
            },
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    format!("No employee with id '{}' is on record", id),
                ),
            },
            EngineError::RulesNotFound { date } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "RULES_NOT_FOUND",
                    message,
                    format!("Every configured rate file takes effect after {}", date),
                ),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

/// Tenure on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenureResponse {
    /// Calendar days between admission and termination.
    pub elapsed_days: i64,
    /// Whole months of service.
    pub total_months: u32,
    /// Whole years of service.
    pub completed_years: u32,
    /// Months since the last completed year.
    pub months_in_current_year: u32,
}

impl From<Tenure> for TenureResponse {
    fn from(tenure: Tenure) -> Self {
        Self {
            elapsed_days: tenure.elapsed_days,
            total_months: tenure.total_months,
            completed_years: tenure.completed_years,
            months_in_current_year: tenure.months_in_current_year,
        }
    }
}

/// The settlement lines on the wire, rounded to two places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLines {
    /// Salary owed for the termination month.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_of_salary: Decimal,
    /// Vacation earned in completed years.
    #[serde(with = "rust_decimal::serde::float")]
    pub vested_vacation_pay: Decimal,
    /// Vacation accrued in the current year.
    #[serde(with = "rust_decimal::serde::float")]
    pub pro_rated_vacation_pay: Decimal,
    /// Year-end bonus accrued in the current year.
    #[serde(with = "rust_decimal::serde::float")]
    pub pro_rated_year_end_bonus: Decimal,
    /// Notice period paid in lieu.
    #[serde(with = "rust_decimal::serde::float")]
    pub notice_indemnity: Decimal,
    /// Employer penalty on the severance fund.
    #[serde(with = "rust_decimal::serde::float")]
    pub severance_fund_penalty: Decimal,
    /// Severance fund balance released.
    #[serde(with = "rust_decimal::serde::float")]
    pub severance_fund_withdrawal: Decimal,
    /// Social security withheld.
    #[serde(with = "rust_decimal::serde::float")]
    pub social_security_withholding: Decimal,
    /// Income tax withheld.
    #[serde(with = "rust_decimal::serde::float")]
    pub income_tax_withholding: Decimal,
    /// Manual deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub other_deductions: Decimal,
    /// Sum of all credit lines.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_total: Decimal,
    /// Gross total less all deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_total: Decimal,
}

impl From<&SettlementBreakdown> for SettlementLines {
    fn from(breakdown: &SettlementBreakdown) -> Self {
        let b = breakdown.rounded();
        Self {
            balance_of_salary: b.balance_of_salary,
            vested_vacation_pay: b.vested_vacation_pay,
            pro_rated_vacation_pay: b.pro_rated_vacation_pay,
            pro_rated_year_end_bonus: b.pro_rated_year_end_bonus,
            notice_indemnity: b.notice_indemnity,
            severance_fund_penalty: b.severance_fund_penalty,
            severance_fund_withdrawal: b.severance_fund_withdrawal,
            social_security_withholding: b.social_security_withholding,
            income_tax_withholding: b.income_tax_withholding,
            other_deductions: b.other_deductions,
            gross_total: b.gross_total,
            net_total: b.net_total,
        }
    }
}

/// Response body for `POST /settlements/simulate`.
///
/// The settlement lines sit at the top level of the JSON object next to the
/// identifying fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub calculated_at: DateTime<Utc>,
    /// The version of the engine that produced the settlement.
    pub engine_version: String,
    /// The employee the settlement belongs to.
    pub employee_id: String,
    /// How the employment ended.
    pub termination_type: TerminationType,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// Whether the notice period was paid in lieu.
    pub notice_indemnified: bool,
    /// Notice period length in days.
    pub notice_period_days: u32,
    /// The date notice was given, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_date: Option<NaiveDate>,
    /// The tenure the settlement was derived from.
    pub tenure: TenureResponse,
    /// The settlement lines and totals.
    #[serde(flatten)]
    pub lines: SettlementLines,
    /// How every line was reached.
    pub audit_trace: AuditTrace,
}

/// Per-type totals on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTotalsResponse {
    /// Number of settlements.
    pub count: u32,
    /// Sum of their net totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_total: Decimal,
}

impl From<&TypeTotals> for TypeTotalsResponse {
    fn from(totals: &TypeTotals) -> Self {
        Self {
            count: totals.count,
            net_total: round_money(totals.net_total),
        }
    }
}

/// A report entry on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntryResponse {
    /// The employee the settlement belongs to.
    pub employee_id: String,
    /// How the employment ended.
    pub termination_type: TerminationType,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// The settlement's gross total.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_total: Decimal,
    /// The settlement's net total.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_total: Decimal,
}

impl From<&SettlementSummaryEntry> for ReportEntryResponse {
    fn from(entry: &SettlementSummaryEntry) -> Self {
        Self {
            employee_id: entry.employee_id.clone(),
            termination_type: entry.termination_type,
            termination_date: entry.termination_date,
            gross_total: round_money(entry.gross_total),
            net_total: round_money(entry.net_total),
        }
    }
}

/// The report filter echoed back on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilterResponse {
    /// Earliest termination date included.
    pub from: Option<NaiveDate>,
    /// Latest termination date included.
    pub to: Option<NaiveDate>,
    /// Termination type included, if restricted.
    pub termination_type: Option<TerminationType>,
}

impl From<&ReportFilter> for ReportFilterResponse {
    fn from(filter: &ReportFilter) -> Self {
        Self {
            from: filter.from,
            to: filter.to,
            termination_type: filter.termination_type,
        }
    }
}

/// Response body for `POST /settlements/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// The filter the report was produced with.
    pub filter: ReportFilterResponse,
    /// Number of settlements included.
    pub total_settlements: u32,
    /// Sum of gross totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gross: Decimal,
    /// Sum of net totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_net: Decimal,
    /// Totals per termination type.
    pub by_type: BTreeMap<TerminationType, TypeTotalsResponse>,
    /// Included settlements, most recent termination first.
    pub entries: Vec<ReportEntryResponse>,
}

impl From<&SettlementReport> for ReportResponse {
    fn from(report: &SettlementReport) -> Self {
        Self {
            filter: (&report.filter).into(),
            total_settlements: report.total_settlements,
            total_gross: round_money(report.total_gross),
            total_net: round_money(report.total_net),
            by_type: report
                .by_type
                .iter()
                .map(|(termination_type, totals)| (*termination_type, totals.into()))
                .collect(),
            entries: report.entries.iter().map(Into::into).collect(),
        }
    }
}
