//! Termination request model.
//!
//! This module defines the [`TerminationType`] enum and the
//! [`TerminationRequest`] value object describing how an employment ended.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default notice period in days.
pub const DEFAULT_NOTICE_PERIOD_DAYS: u32 = 30;

/// How the employment relationship was ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminationType {
    /// Dismissal by the employer without cause.
    WithoutCause,
    /// Dismissal by the employer for cause.
    WithCause,
    /// Resignation initiated by the employee.
    EmployeeResignation,
    /// Termination agreed by both parties.
    MutualAgreement,
}

impl TerminationType {
    /// All recognised termination types.
    pub const ALL: [TerminationType; 4] = [
        TerminationType::WithoutCause,
        TerminationType::WithCause,
        TerminationType::EmployeeResignation,
        TerminationType::MutualAgreement,
    ];

    /// The wire tag for this termination type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationType::WithoutCause => "WITHOUT_CAUSE",
            TerminationType::WithCause => "WITH_CAUSE",
            TerminationType::EmployeeResignation => "EMPLOYEE_RESIGNATION",
            TerminationType::MutualAgreement => "MUTUAL_AGREEMENT",
        }
    }
}

impl fmt::Display for TerminationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminationType {
    type Err = EngineError;

    /// Parses a wire tag such as `"WITHOUT_CAUSE"`.
    ///
    /// ```
    /// use settlement_engine::models::TerminationType;
    ///
    /// let parsed: TerminationType = "MUTUAL_AGREEMENT".parse().unwrap();
    /// assert_eq!(parsed, TerminationType::MutualAgreement);
    /// assert!("RETIREMENT".parse::<TerminationType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerminationType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "termination_type",
                    format!("unknown termination type '{}'", s),
                )
            })
    }
}

/// A request to settle a termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationRequest {
    /// How the employment ended.
    pub termination_type: TerminationType,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// Whether the notice period is paid in lieu rather than worked.
    #[serde(default)]
    pub notice_indemnified: bool,
    /// The length of the notice period in days.
    #[serde(default = "default_notice_period_days")]
    pub notice_period_days: u32,
    /// The date notice was given, if recorded.
    #[serde(default)]
    pub notice_date: Option<NaiveDate>,
    /// Manual deductions applied at aggregation.
    #[serde(default)]
    pub other_deductions: Decimal,
}

fn default_notice_period_days() -> u32 {
    DEFAULT_NOTICE_PERIOD_DAYS
}

impl TerminationRequest {
    /// Creates a request with the default notice period and no manual deductions.
    pub fn new(
        termination_type: TerminationType,
        termination_date: NaiveDate,
        notice_indemnified: bool,
    ) -> Self {
        Self {
            termination_type,
            termination_date,
            notice_indemnified,
            notice_period_days: DEFAULT_NOTICE_PERIOD_DAYS,
            notice_date: None,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Returns true if this termination is a dismissal without cause.
    pub fn is_without_cause(&self) -> bool {
        self.termination_type == TerminationType::WithoutCause
    }
}

/// Parses a `YYYY-MM-DD` calendar date, reporting failures against `field`.
///
/// ```
/// use settlement_engine::models::parse_date;
///
/// assert!(parse_date("termination_date", "2024-02-29").is_ok());
/// assert!(parse_date("termination_date", "2023-02-29").is_err());
/// ```
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        EngineError::invalid_input(
            field,
            format!("'{}' is not a valid YYYY-MM-DD date: {}", value, e),
        )
    })
}
