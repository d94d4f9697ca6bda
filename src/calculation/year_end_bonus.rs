//! Pro-rated year-end bonus calculation.

use rust_decimal::Decimal;

use super::tenure::MONTHS_PER_YEAR;
use crate::models::{AuditStep, Tenure, format_money};

/// The result of a year-end bonus calculation.
#[derive(Debug, Clone)]
pub struct YearEndBonusResult {
    /// The pro-rated year-end bonus.
    pub pro_rated_year_end_bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the pro-rated year-end bonus.
///
/// The bonus is `base_salary / 12 * (months_in_current_year + 1)`: the month
/// of termination always counts, so the bonus is never less than one twelfth
/// of salary.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_year_end_bonus;
/// use settlement_engine::models::Tenure;
/// use rust_decimal::Decimal;
///
/// let tenure = Tenure {
///     elapsed_days: 0,
///     total_months: 0,
///     completed_years: 0,
///     months_in_current_year: 0,
/// };
/// let result = calculate_year_end_bonus(Decimal::new(1200, 0), &tenure, 1);
/// assert_eq!(result.pro_rated_year_end_bonus, Decimal::new(100, 0));
/// ```
pub fn calculate_year_end_bonus(
    base_salary: Decimal,
    tenure: &Tenure,
    step_number: u32,
) -> YearEndBonusResult {
    let bonus_months = tenure.months_in_current_year + 1;
    let pro_rated_year_end_bonus =
        base_salary * Decimal::from(bonus_months) / Decimal::from(MONTHS_PER_YEAR);

    let audit_step = AuditStep {
        step_number,
        rule_id: "pro_rated_year_end_bonus".to_string(),
        rule_name: "Pro-rated Year-end Bonus".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "months_in_current_year": tenure.months_in_current_year
        }),
        output: serde_json::json!({
            "bonus_months": bonus_months,
            "pro_rated_year_end_bonus": pro_rated_year_end_bonus.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} x ({} months + termination month) = {}",
            base_salary.normalize(),
            MONTHS_PER_YEAR,
            tenure.months_in_current_year,
            format_money(pro_rated_year_end_bonus)
        ),
    };

    YearEndBonusResult {
        pro_rated_year_end_bonus,
        audit_step,
    }
}
