//! Vacation pay calculation functionality.
//!
//! This module calculates the two vacation lines of a settlement: vested
//! vacation for completed years of service and pro-rated vacation for the
//! months of the current year.

use rust_decimal::Decimal;

use super::tenure::MONTHS_PER_YEAR;
use crate::models::{AuditStep, Tenure, format_money};

/// The result of a vacation pay calculation.
#[derive(Debug, Clone)]
pub struct VacationPayResult {
    /// One full salary per completed year of service.
    pub vested_vacation_pay: Decimal,
    /// Twelfths of salary for the months of the current year.
    pub pro_rated_vacation_pay: Decimal,
    /// Audit steps for the vested and pro-rated lines, in that order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates vested and pro-rated vacation pay.
///
/// - Vested: `base_salary * completed_years`.
/// - Pro-rated: `base_salary / 12 * months_in_current_year`, or zero when no
///   month of the current year has been completed.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_vacation_pay;
/// use settlement_engine::models::Tenure;
/// use rust_decimal::Decimal;
///
/// let tenure = Tenure {
///     elapsed_days: 480,
///     total_months: 16,
///     completed_years: 1,
///     months_in_current_year: 4,
/// };
/// let result = calculate_vacation_pay(Decimal::new(3000, 0), &tenure, 1);
/// assert_eq!(result.vested_vacation_pay, Decimal::new(3000, 0));
/// assert_eq!(result.pro_rated_vacation_pay, Decimal::new(1000, 0));
/// ```
pub fn calculate_vacation_pay(
    base_salary: Decimal,
    tenure: &Tenure,
    step_number: u32,
) -> VacationPayResult {
    let years = Decimal::from(tenure.completed_years);
    let vested_vacation_pay = base_salary * years;

    let vested_step = AuditStep {
        step_number,
        rule_id: "vested_vacation_pay".to_string(),
        rule_name: "Vested Vacation Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "completed_years": tenure.completed_years
        }),
        output: serde_json::json!({
            "vested_vacation_pay": vested_vacation_pay.normalize().to_string()
        }),
        reasoning: if tenure.completed_years > 0 {
            format!(
                "{} x {} completed years = {}",
                base_salary.normalize(),
                tenure.completed_years,
                format_money(vested_vacation_pay)
            )
        } else {
            "No completed year of service, no vested vacation".to_string()
        },
    };

    let months = tenure.months_in_current_year;
    let (pro_rated_vacation_pay, pro_rated_reasoning) = if months >= 1 {
        let amount = base_salary * Decimal::from(months) / Decimal::from(MONTHS_PER_YEAR);
        let reasoning = format!(
            "{} / {} x {} months = {}",
            base_salary.normalize(),
            MONTHS_PER_YEAR,
            months,
            format_money(amount)
        );
        (amount, reasoning)
    } else {
        (
            Decimal::ZERO,
            "No month completed in the current year, no pro-rated vacation".to_string(),
        )
    };

    let pro_rated_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "pro_rated_vacation_pay".to_string(),
        rule_name: "Pro-rated Vacation Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "months_in_current_year": months
        }),
        output: serde_json::json!({
            "pro_rated_vacation_pay": pro_rated_vacation_pay.normalize().to_string()
        }),
        reasoning: pro_rated_reasoning,
    };

    VacationPayResult {
        vested_vacation_pay,
        pro_rated_vacation_pay,
        audit_steps: vec![vested_step, pro_rated_step],
    }
}
