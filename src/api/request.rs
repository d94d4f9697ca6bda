//! Request types for the Settlement Engine API.
//!
//! This module defines the JSON request structures for the `/settlements`
//! endpoints. Wire names are camelCase.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DEFAULT_NOTICE_PERIOD_DAYS, ReportFilter, SettlementSummaryEntry, TerminationRequest,
    TerminationType, parse_date,
};

/// Request body for `POST /settlements/simulate`.
///
/// The termination type and dates arrive as plain strings so a bad value is
/// reported as `INVALID_INPUT` naming the field, rather than as an opaque
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// The employee to settle, resolved through the employee directory.
    pub employee_id: String,
    /// A termination type tag such as `"WITHOUT_CAUSE"`.
    pub termination_type: String,
    /// The last day of employment, `YYYY-MM-DD`.
    pub termination_date: String,
    /// Whether the notice period is paid in lieu.
    #[serde(default)]
    pub notice_indemnified: bool,
    /// Notice period length in days. Defaults to 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_period_days: Option<u32>,
    /// The date notice was given, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_date: Option<String>,
    /// Manual deductions. Defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_deductions: Option<Decimal>,
}

impl SimulateRequest {
    /// Creates a request with only the required fields set.
    pub fn new(
        employee_id: impl Into<String>,
        termination_type: TerminationType,
        termination_date: NaiveDate,
        notice_indemnified: bool,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            termination_type: termination_type.to_string(),
            termination_date: termination_date.to_string(),
            notice_indemnified,
            notice_period_days: None,
            notice_date: None,
            other_deductions: None,
        }
    }
}

impl TryFrom<&SimulateRequest> for TerminationRequest {
    type Error = EngineError;

    fn try_from(req: &SimulateRequest) -> EngineResult<Self> {
        if req.employee_id.trim().is_empty() {
            return Err(EngineError::invalid_input("employee_id", "must not be empty"));
        }

        let termination_type: TerminationType = req.termination_type.parse()?;
        let termination_date = parse_date("termination_date", &req.termination_date)?;
        let notice_date = req
            .notice_date
            .as_deref()
            .map(|value| parse_date("notice_date", value))
            .transpose()?;

        Ok(TerminationRequest {
            termination_type,
            termination_date,
            notice_indemnified: req.notice_indemnified,
            notice_period_days: req.notice_period_days.unwrap_or(DEFAULT_NOTICE_PERIOD_DAYS),
            notice_date,
            other_deductions: req.other_deductions.unwrap_or(Decimal::ZERO),
        })
    }
}

/// Report filter on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilterRequest {
    /// Earliest termination date to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Latest termination date to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Only include this termination type.
    #[serde(default)]
    pub termination_type: Option<TerminationType>,
}

impl From<ReportFilterRequest> for ReportFilter {
    fn from(req: ReportFilterRequest) -> Self {
        ReportFilter {
            from: req.from,
            to: req.to,
            termination_type: req.termination_type,
        }
    }
}

/// One computed settlement on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummaryRequest {
    /// The employee the settlement belongs to.
    pub employee_id: String,
    /// How the employment ended.
    pub termination_type: TerminationType,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// The settlement's gross total.
    pub gross_total: Decimal,
    /// The settlement's net total.
    pub net_total: Decimal,
}

impl From<SettlementSummaryRequest> for SettlementSummaryEntry {
    fn from(req: SettlementSummaryRequest) -> Self {
        SettlementSummaryEntry {
            employee_id: req.employee_id,
            termination_type: req.termination_type,
            termination_date: req.termination_date,
            gross_total: req.gross_total,
            net_total: req.net_total,
        }
    }
}

/// Request body for `POST /settlements/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Which settlements to include. Omitted means all.
    #[serde(default)]
    pub filter: ReportFilterRequest,
    /// The computed settlements to summarise.
    pub settlements: Vec<SettlementSummaryRequest>,
}
