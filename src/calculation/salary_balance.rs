//! Balance of salary calculation.
//!
//! Pays the days worked in the termination month against a fixed-length
//! reference month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{AuditStep, format_money};

/// The result of a balance of salary calculation.
#[derive(Debug, Clone)]
pub struct SalaryBalanceResult {
    /// The salary owed for the termination month.
    pub balance_of_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the salary owed for the days worked in the termination month.
///
/// The amount is `base_salary / reference_month_days * day_of_month`, where
/// `day_of_month` is the calendar day of `termination_date`. The product is
/// formed before the quotient so whole results stay exact.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_salary_balance;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_salary_balance(
///     Decimal::new(8000, 0),
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     30,
///     2,
/// );
/// assert_eq!(result.balance_of_salary, Decimal::new(4000, 0));
/// ```
pub fn calculate_salary_balance(
    base_salary: Decimal,
    termination_date: NaiveDate,
    reference_month_days: u32,
    step_number: u32,
) -> SalaryBalanceResult {
    let day_of_month = termination_date.day();
    let balance_of_salary =
        base_salary * Decimal::from(day_of_month) / Decimal::from(reference_month_days);

    let audit_step = AuditStep {
        step_number,
        rule_id: "balance_of_salary".to_string(),
        rule_name: "Balance of Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "termination_date": termination_date.to_string(),
            "day_of_month": day_of_month,
            "reference_month_days": reference_month_days
        }),
        output: serde_json::json!({
            "balance_of_salary": balance_of_salary.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} x {} days = {}",
            base_salary.normalize(),
            reference_month_days,
            day_of_month,
            format_money(balance_of_salary)
        ),
    };

    SalaryBalanceResult {
        balance_of_salary,
        audit_step,
    }
}
