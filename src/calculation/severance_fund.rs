//! Severance fund calculation.
//!
//! The employer deposits a share of the salary into the employee's severance
//! fund every month of service. On dismissal without cause the balance is
//! released to the employee and the employer owes a penalty on it.

use rust_decimal::Decimal;

use crate::config::SeveranceFundRates;
use crate::models::{AuditStep, Tenure, TerminationType, format_money};

/// The result of a severance fund calculation.
#[derive(Debug, Clone)]
pub struct SeveranceFundResult {
    /// The accumulated fund balance, `base * deposit_rate * total_months`.
    pub fund_total: Decimal,
    /// Penalty owed by the employer on the balance.
    pub severance_fund_penalty: Decimal,
    /// Balance released to the employee.
    pub severance_fund_withdrawal: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the severance fund balance, penalty and withdrawal.
///
/// The balance is always computed so it appears in the audit trail, but the
/// penalty and withdrawal are only paid out for
/// [`TerminationType::WithoutCause`].
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_severance_fund;
/// use settlement_engine::config::SettlementRules;
/// use settlement_engine::models::{Tenure, TerminationType};
/// use rust_decimal::Decimal;
///
/// let tenure = Tenure {
///     elapsed_days: 730,
///     total_months: 24,
///     completed_years: 2,
///     months_in_current_year: 0,
/// };
/// let rules = SettlementRules::default();
/// let result = calculate_severance_fund(
///     Decimal::new(8000, 0),
///     &tenure,
///     TerminationType::WithoutCause,
///     &rules.severance_fund,
///     1,
/// );
/// assert_eq!(result.fund_total, Decimal::new(15360, 0));
/// assert_eq!(result.severance_fund_penalty, Decimal::new(6144, 0));
/// assert_eq!(result.severance_fund_withdrawal, Decimal::new(15360, 0));
/// ```
pub fn calculate_severance_fund(
    base_salary: Decimal,
    tenure: &Tenure,
    termination_type: TerminationType,
    rates: &SeveranceFundRates,
    step_number: u32,
) -> SeveranceFundResult {
    let fund_total = base_salary * rates.deposit_rate * Decimal::from(tenure.total_months);

    let paid_out = termination_type == TerminationType::WithoutCause;
    let (severance_fund_penalty, severance_fund_withdrawal) = if paid_out {
        (fund_total * rates.penalty_rate, fund_total)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let reasoning = if paid_out {
        format!(
            "Fund {} x {} x {} months = {}; penalty {} = {}; balance withdrawn",
            base_salary.normalize(),
            rates.deposit_rate.normalize(),
            tenure.total_months,
            format_money(fund_total),
            rates.penalty_rate.normalize(),
            format_money(severance_fund_penalty)
        )
    } else {
        format!(
            "Fund {} accumulated; {} releases no penalty or withdrawal",
            format_money(fund_total),
            termination_type
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "severance_fund".to_string(),
        rule_name: "Severance Fund".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "total_months": tenure.total_months,
            "deposit_rate": rates.deposit_rate.normalize().to_string(),
            "penalty_rate": rates.penalty_rate.normalize().to_string(),
            "termination_type": termination_type
        }),
        output: serde_json::json!({
            "fund_total": fund_total.normalize().to_string(),
            "severance_fund_penalty": severance_fund_penalty.normalize().to_string(),
            "severance_fund_withdrawal": severance_fund_withdrawal.normalize().to_string()
        }),
        reasoning,
    };

    SeveranceFundResult {
        fund_total,
        severance_fund_penalty,
        severance_fund_withdrawal,
        audit_step,
    }
}
