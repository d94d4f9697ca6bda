//! Tenure calculation functionality.
//!
//! This module measures how long an employee served, in whole months and
//! whole years, which every pro-rated settlement line depends on.

use chrono::{Datelike, NaiveDate};

use crate::config::{SettlementRules, TenureBasis};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Tenure};

/// Number of months in a vesting year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of a tenure calculation, including the tenure and audit step.
#[derive(Debug, Clone)]
pub struct TenureResult {
    /// The measured tenure.
    pub tenure: Tenure,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Measures the tenure between admission and termination.
///
/// With [`TenureBasis::ThirtyDayMonths`] a month is any run of
/// `reference_month_days` elapsed days, so `total_months` is
/// `floor(elapsed_days / 30)` under the standard rules. With
/// [`TenureBasis::CalendarMonths`] a month completes when the termination
/// day-of-month reaches the admission day-of-month.
///
/// # Errors
///
/// Returns `InvalidInput` if `termination_date` is before `admission_date`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_tenure;
/// use settlement_engine::config::SettlementRules;
/// use chrono::NaiveDate;
///
/// let result = calculate_tenure(
///     NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     &SettlementRules::default(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.tenure.elapsed_days, 730);
/// assert_eq!(result.tenure.total_months, 24);
/// assert_eq!(result.tenure.completed_years, 2);
/// assert_eq!(result.tenure.months_in_current_year, 0);
/// ```
pub fn calculate_tenure(
    admission_date: NaiveDate,
    termination_date: NaiveDate,
    rules: &SettlementRules,
    step_number: u32,
) -> EngineResult<TenureResult> {
    if termination_date < admission_date {
        return Err(EngineError::invalid_input(
            "termination_date",
            format!(
                "termination date {} is before admission date {}",
                termination_date, admission_date
            ),
        ));
    }

    let elapsed_days = (termination_date - admission_date).num_days();

    let total_months = match rules.tenure_basis {
        TenureBasis::ThirtyDayMonths => {
            let months = elapsed_days / i64::from(rules.reference_month_days);
            u32::try_from(months).map_err(|_| {
                EngineError::invalid_input("termination_date", "tenure is out of range")
            })?
        }
        TenureBasis::CalendarMonths => calendar_months_between(admission_date, termination_date),
    };

    let tenure = Tenure {
        elapsed_days,
        total_months,
        completed_years: total_months / MONTHS_PER_YEAR,
        months_in_current_year: total_months % MONTHS_PER_YEAR,
    };

    let basis = match rules.tenure_basis {
        TenureBasis::ThirtyDayMonths => "thirty_day_months",
        TenureBasis::CalendarMonths => "calendar_months",
    };

    let reasoning = match rules.tenure_basis {
        TenureBasis::ThirtyDayMonths => format!(
            "{} days / {} = {} months ({} years + {} months)",
            elapsed_days,
            rules.reference_month_days,
            tenure.total_months,
            tenure.completed_years,
            tenure.months_in_current_year
        ),
        TenureBasis::CalendarMonths => format!(
            "{} whole calendar months from {} to {} ({} years + {} months)",
            tenure.total_months,
            admission_date,
            termination_date,
            tenure.completed_years,
            tenure.months_in_current_year
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tenure".to_string(),
        rule_name: "Tenure".to_string(),
        input: serde_json::json!({
            "admission_date": admission_date.to_string(),
            "termination_date": termination_date.to_string(),
            "tenure_basis": basis,
            "reference_month_days": rules.reference_month_days
        }),
        output: serde_json::json!({
            "elapsed_days": tenure.elapsed_days,
            "total_months": tenure.total_months,
            "completed_years": tenure.completed_years,
            "months_in_current_year": tenure.months_in_current_year
        }),
        reasoning,
    };

    Ok(TenureResult { tenure, audit_step })
}

/// Whole calendar months from `start` to `end`, with `start <= end`.
fn calendar_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    u32::try_from(months).unwrap_or(0)
}
