//! Settlement calculation pipeline.
//!
//! This module chains the individual rules into a full settlement:
//!
//! 1. Tenure
//! 2. Balance of salary
//! 3. Vested vacation pay
//! 4. Pro-rated vacation pay
//! 5. Pro-rated year-end bonus
//! 6. Notice indemnity
//! 7. Severance fund
//! 8. Social security withholding
//! 9. Income tax withholding
//! 10. Totals
//!
//! Each step appends one [`AuditStep`] in that order. Nothing is rounded
//! along the way.

use rust_decimal::Decimal;
use tracing::debug;

use super::notice_indemnity::calculate_notice_indemnity;
use super::salary_balance::calculate_salary_balance;
use super::severance_fund::calculate_severance_fund;
use super::tenure::calculate_tenure;
use super::vacation_pay::calculate_vacation_pay;
use super::validation::validate_inputs;
use super::withholding::calculate_withholding;
use super::year_end_bonus::calculate_year_end_bonus;
use crate::config::SettlementRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, EmployeeFacts, SettlementBreakdown, SettlementCalculation,
    TerminationRequest, format_money,
};

/// Warning code raised when deductions exceed the gross total.
pub const NET_TOTAL_NEGATIVE: &str = "NET_TOTAL_NEGATIVE";

/// Computes a settlement under the standard rules.
///
/// This is the plain form of [`compute_settlement`]: same validation, same
/// arithmetic, but only the breakdown is returned.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidInput`] when a precondition
/// fails. No partial breakdown is ever produced.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::compute;
/// use settlement_engine::models::{EmployeeFacts, TerminationRequest, TerminationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeFacts::new(
///     "emp_001",
///     Decimal::new(8000, 0),
///     NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
/// )
/// .unwrap();
/// let request = TerminationRequest::new(
///     TerminationType::WithoutCause,
///     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     true,
/// );
///
/// let breakdown = compute(&employee, &request).unwrap().rounded();
/// assert_eq!(breakdown.vested_vacation_pay, Decimal::new(16000, 0));
/// assert_eq!(breakdown.notice_indemnity, Decimal::new(8000, 0));
/// assert_eq!(breakdown.severance_fund_penalty, Decimal::new(6144, 0));
/// ```
pub fn compute(
    employee: &EmployeeFacts,
    request: &TerminationRequest,
) -> EngineResult<SettlementBreakdown> {
    compute_settlement(employee, request, &SettlementRules::default())
        .map(|calculation| calculation.breakdown)
}

/// Computes a settlement under `rules`, with tenure, audit steps and warnings.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the salary is not positive,
/// the termination predates the admission, other deductions are negative, or
/// a monetary input is too large for the totals to be represented.
pub fn compute_settlement(
    employee: &EmployeeFacts,
    request: &TerminationRequest,
    rules: &SettlementRules,
) -> EngineResult<SettlementCalculation> {
    validate_inputs(employee, request)?;

    let base_salary = employee.base_salary;
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let tenure_result = calculate_tenure(
        employee.admission_date,
        request.termination_date,
        rules,
        next_step(&steps),
    )?;
    let tenure = tenure_result.tenure;
    steps.push(tenure_result.audit_step);

    let balance = calculate_salary_balance(
        base_salary,
        request.termination_date,
        rules.reference_month_days,
        next_step(&steps),
    );
    steps.push(balance.audit_step);

    let vacation = calculate_vacation_pay(base_salary, &tenure, next_step(&steps));
    steps.extend(vacation.audit_steps);

    let bonus = calculate_year_end_bonus(base_salary, &tenure, next_step(&steps));
    steps.push(bonus.audit_step);

    let notice = calculate_notice_indemnity(base_salary, request, next_step(&steps));
    steps.push(notice.audit_step);
    warnings.extend(notice.warning);

    let fund = calculate_severance_fund(
        base_salary,
        &tenure,
        request.termination_type,
        &rules.severance_fund,
        next_step(&steps),
    );
    steps.push(fund.audit_step);

    let gross_subtotal = checked_sum(
        "gross_total",
        &[
            balance.balance_of_salary,
            vacation.vested_vacation_pay,
            vacation.pro_rated_vacation_pay,
            bonus.pro_rated_year_end_bonus,
            notice.notice_indemnity,
        ],
    )?;

    let withholding = calculate_withholding(gross_subtotal, rules, next_step(&steps));
    steps.extend(withholding.audit_steps);

    let gross_total = checked_sum(
        "gross_total",
        &[
            gross_subtotal,
            fund.severance_fund_penalty,
            fund.severance_fund_withdrawal,
        ],
    )?;
    let total_deductions = checked_sum(
        "other_deductions",
        &[
            withholding.social_security_withholding,
            withholding.income_tax_withholding,
            request.other_deductions,
        ],
    )?;
    let net_total = gross_total
        .checked_sub(total_deductions)
        .ok_or_else(|| out_of_range("other_deductions"))?;

    let breakdown = SettlementBreakdown {
        balance_of_salary: balance.balance_of_salary,
        vested_vacation_pay: vacation.vested_vacation_pay,
        pro_rated_vacation_pay: vacation.pro_rated_vacation_pay,
        pro_rated_year_end_bonus: bonus.pro_rated_year_end_bonus,
        notice_indemnity: notice.notice_indemnity,
        severance_fund_penalty: fund.severance_fund_penalty,
        severance_fund_withdrawal: fund.severance_fund_withdrawal,
        social_security_withholding: withholding.social_security_withholding,
        income_tax_withholding: withholding.income_tax_withholding,
        other_deductions: request.other_deductions,
        gross_total,
        net_total,
    };

    steps.push(AuditStep {
        step_number: next_step(&steps),
        rule_id: "settlement_totals".to_string(),
        rule_name: "Settlement Totals".to_string(),
        input: serde_json::json!({
            "gross_subtotal": gross_subtotal.normalize().to_string(),
            "severance_fund_penalty": breakdown.severance_fund_penalty.normalize().to_string(),
            "severance_fund_withdrawal": breakdown.severance_fund_withdrawal.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_total": breakdown.gross_total.normalize().to_string(),
            "net_total": breakdown.net_total.normalize().to_string()
        }),
        reasoning: format!(
            "Gross {} - deductions {} = net {}",
            format_money(breakdown.gross_total),
            format_money(total_deductions),
            format_money(breakdown.net_total)
        ),
    });

    if breakdown.net_total < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NET_TOTAL_NEGATIVE.to_string(),
            message: format!(
                "Deductions of {} exceed the gross total of {}",
                format_money(total_deductions),
                format_money(breakdown.gross_total)
            ),
            severity: "high".to_string(),
        });
    }

    debug!(
        employee_id = %employee.id,
        termination_type = %request.termination_type,
        total_months = tenure.total_months,
        gross_total = %breakdown.gross_total,
        net_total = %breakdown.net_total,
        "Settlement computed"
    );

    Ok(SettlementCalculation {
        tenure,
        breakdown,
        steps,
        warnings,
    })
}

fn next_step(steps: &[AuditStep]) -> u32 {
    u32::try_from(steps.len()).map_or(u32::MAX, |n| n + 1)
}

fn checked_sum(field: &str, amounts: &[Decimal]) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| out_of_range(field))
}

fn out_of_range(field: &str) -> EngineError {
    EngineError::invalid_input(field, "amount exceeds the representable range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SocialSecurityBand, TenureBasis};
    use crate::models::{MAX_MONEY_INPUT, TerminationType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(salary: &str, admission: NaiveDate) -> EmployeeFacts {
        EmployeeFacts::new("emp_001", dec(salary), admission).unwrap()
    }

    fn two_year_dismissal() -> (EmployeeFacts, TerminationRequest) {
        (
            employee("8000.00", date(2022, 1, 15)),
            TerminationRequest::new(TerminationType::WithoutCause, date(2024, 1, 15), true),
        )
    }

    #[test]
    fn test_two_year_dismissal_without_cause() {
        let (employee, request) = two_year_dismissal();
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();
        let b = calculation.breakdown.rounded();

        assert_eq!(calculation.tenure.total_months, 24);
        assert_eq!(calculation.tenure.completed_years, 2);
        assert_eq!(b.balance_of_salary, dec("4000.00"));
        assert_eq!(b.vested_vacation_pay, dec("16000.00"));
        assert_eq!(b.pro_rated_vacation_pay, dec("0.00"));
        assert_eq!(b.pro_rated_year_end_bonus, dec("666.67"));
        assert_eq!(b.notice_indemnity, dec("8000.00"));
        assert_eq!(b.severance_fund_penalty, dec("6144.00"));
        assert_eq!(b.severance_fund_withdrawal, dec("15360.00"));
        // subtotal 28666.666... x 0.11
        assert_eq!(b.social_security_withholding, dec("3153.33"));
        assert_eq!(b.income_tax_withholding, dec("0.00"));
        assert_eq!(b.gross_total, dec("50170.67"));
        assert_eq!(b.net_total, dec("47017.33"));
        assert!(calculation.warnings.is_empty());
    }

    #[test]
    fn test_audit_steps_follow_pipeline_order() {
        let (employee, request) = two_year_dismissal();
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();

        let rule_ids: Vec<&str> = calculation
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "tenure",
                "balance_of_salary",
                "vested_vacation_pay",
                "pro_rated_vacation_pay",
                "pro_rated_year_end_bonus",
                "notice_indemnity",
                "severance_fund",
                "social_security_withholding",
                "income_tax_withholding",
                "settlement_totals",
            ]
        );
        for (i, step) in calculation.steps.iter().enumerate() {
            assert_eq!(step.step_number as usize, i + 1);
        }
    }

    #[test]
    fn test_compute_matches_compute_settlement() {
        let (employee, request) = two_year_dismissal();
        let breakdown = compute(&employee, &request).unwrap();
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();
        assert_eq!(breakdown, calculation.breakdown);
    }

    #[test]
    fn test_is_idempotent() {
        let (employee, request) = two_year_dismissal();
        let rules = SettlementRules::default();
        let first = compute_settlement(&employee, &request, &rules).unwrap();
        let second = compute_settlement(&employee, &request, &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resignation_pays_no_dismissal_lines() {
        let employee = employee("8000.00", date(2022, 1, 15));
        let request =
            TerminationRequest::new(TerminationType::EmployeeResignation, date(2024, 1, 15), true);
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();
        let b = &calculation.breakdown;

        assert_eq!(b.notice_indemnity, Decimal::ZERO);
        assert_eq!(b.severance_fund_penalty, Decimal::ZERO);
        assert_eq!(b.severance_fund_withdrawal, Decimal::ZERO);
        assert_eq!(b.vested_vacation_pay, dec("16000"));
        assert_eq!(calculation.warnings.len(), 1);
        assert_eq!(calculation.warnings[0].code, "NOTICE_FLAG_IGNORED");
    }

    #[test]
    fn test_same_day_termination() {
        let employee = employee("3000.00", date(2024, 3, 10));
        let request = TerminationRequest::new(TerminationType::WithCause, date(2024, 3, 10), false);
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();
        let b = &calculation.breakdown;

        assert_eq!(calculation.tenure.total_months, 0);
        assert_eq!(b.vested_vacation_pay, Decimal::ZERO);
        assert_eq!(b.pro_rated_vacation_pay, Decimal::ZERO);
        // 10 days of a 30-day month
        assert_eq!(b.balance_of_salary, dec("1000"));
        assert_eq!(b.pro_rated_year_end_bonus, dec("250"));
    }

    #[test]
    fn test_other_deductions_reduce_net() {
        let (employee, mut request) = two_year_dismissal();
        request.other_deductions = dec("17.33");
        let b = compute(&employee, &request).unwrap().rounded();
        assert_eq!(b.other_deductions, dec("17.33"));
        assert_eq!(b.net_total, dec("47000.00"));
    }

    #[test]
    fn test_deductions_exceeding_gross_raise_warning() {
        let employee = employee("1000.00", date(2024, 1, 1));
        let mut request =
            TerminationRequest::new(TerminationType::EmployeeResignation, date(2024, 1, 1), false);
        request.other_deductions = dec("5000");
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();

        assert!(calculation.breakdown.net_total < Decimal::ZERO);
        assert!(
            calculation
                .warnings
                .iter()
                .any(|w| w.code == NET_TOTAL_NEGATIVE && w.severity == "high")
        );
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let request =
            TerminationRequest::new(TerminationType::WithoutCause, date(2024, 1, 15), false);
        let result = compute(&employee("8000.00", date(2024, 1, 16)), &request);
        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "termination_date"
        ));

        let bad_salary = EmployeeFacts {
            id: "emp_x".to_string(),
            base_salary: dec("-100"),
            admission_date: date(2022, 1, 15),
        };
        assert!(matches!(
            compute(&bad_salary, &request),
            Err(EngineError::InvalidInput { ref field, .. }) if field == "base_salary"
        ));
    }

    #[test]
    fn test_custom_rules_flow_through() {
        let employee = employee("2000.00", date(2023, 1, 31));
        let request =
            TerminationRequest::new(TerminationType::WithoutCause, date(2023, 7, 30), false);
        let rules = SettlementRules {
            tenure_basis: TenureBasis::CalendarMonths,
            social_security_bands: vec![
                SocialSecurityBand {
                    up_to: Some(dec("1000")),
                    rate: dec("0.05"),
                },
                SocialSecurityBand {
                    up_to: None,
                    rate: dec("0.10"),
                },
            ],
            ..SettlementRules::default()
        };
        let calculation = compute_settlement(&employee, &request, &rules).unwrap();

        // Jan 31 -> Jul 30: the 30th has not reached the 31st, so 5 months
        assert_eq!(calculation.tenure.total_months, 5);
        let subtotal = calculation.breakdown.balance_of_salary
            + calculation.breakdown.pro_rated_vacation_pay
            + calculation.breakdown.pro_rated_year_end_bonus;
        assert_eq!(
            calculation.breakdown.social_security_withholding,
            subtotal * dec("0.10")
        );
    }

    #[test]
    fn test_huge_other_deductions_return_error() {
        let (employee, mut request) = two_year_dismissal();
        request.other_deductions = Decimal::MAX;
        assert!(matches!(
            compute(&employee, &request),
            Err(EngineError::InvalidInput { ref field, .. }) if field == "other_deductions"
        ));
    }

    #[test]
    fn test_largest_inputs_still_compute() {
        let employee = employee(&MAX_MONEY_INPUT.to_string(), date(1900, 1, 1));
        let mut request =
            TerminationRequest::new(TerminationType::WithoutCause, date(2099, 12, 31), true);
        request.other_deductions = Decimal::from(MAX_MONEY_INPUT);

        let breakdown = compute(&employee, &request).unwrap();
        assert!(breakdown.gross_total > Decimal::from(MAX_MONEY_INPUT));
        assert!(breakdown.net_total <= breakdown.gross_total);
    }

    #[test]
    fn test_totals_overflow_is_invalid_input() {
        assert!(checked_sum("gross_total", &[dec("1"), dec("2.5")]).is_ok());
        assert!(matches!(
            checked_sum("gross_total", &[Decimal::MAX, Decimal::ONE]),
            Err(EngineError::InvalidInput { ref field, .. }) if field == "gross_total"
        ));
    }

    #[test]
    fn test_reasoning_carries_no_currency_symbol() {
        let (employee, request) = two_year_dismissal();
        let calculation =
            compute_settlement(&employee, &request, &SettlementRules::default()).unwrap();

        for step in &calculation.steps {
            assert!(!step.reasoning.contains('$'), "{}: {}", step.rule_id, step.reasoning);
        }
        let totals = calculation.steps.last().unwrap();
        assert_eq!(totals.reasoning, "Gross 50170.67 - deductions 3153.33 = net 47017.33");
    }
}
