//! Settlement result models for the Settlement Engine.
//!
//! This module contains the [`SettlementBreakdown`] line items, the
//! [`Tenure`] they are derived from, and the audit structures that record
//! how each line was reached.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits used when presenting monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Largest monetary input accepted, in whole currency units.
///
/// Salaries and manual deductions above this are rejected before any
/// arithmetic runs, which keeps every product of the pipeline well inside
/// the range of [`Decimal`].
pub const MAX_MONEY_INPUT: i64 = 1_000_000_000_000_000;

/// Rounds a monetary amount for presentation.
///
/// Uses midpoint-away-from-zero, so `666.665` becomes `666.67`. Calculation
/// code never calls this; only presentation boundaries do.
///
/// ```
/// use settlement_engine::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bonus = Decimal::from(8000) / Decimal::from(12);
/// assert_eq!(round_money(bonus), Decimal::from_str("666.67").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a monetary amount with exactly two fractional digits.
///
/// ```
/// use settlement_engine::models::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(4000, 0)), "4000.00");
/// ```
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Length of service between admission and termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Calendar days between admission and termination.
    pub elapsed_days: i64,
    /// Whole months of service.
    pub total_months: u32,
    /// Whole twelve-month periods of service.
    pub completed_years: u32,
    /// Months of service since the last completed twelve-month period.
    pub months_in_current_year: u32,
}

/// The line items and totals of a termination settlement.
///
/// Every line is a non-negative magnitude. Withholdings and other
/// deductions are subtracted when `net_total` is formed.
///
/// # Example
///
/// ```
/// use settlement_engine::models::SettlementBreakdown;
/// use rust_decimal::Decimal;
///
/// let empty = SettlementBreakdown::default();
/// assert_eq!(empty.gross_total, Decimal::ZERO);
/// assert_eq!(empty.total_deductions(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementBreakdown {
    /// Salary owed for the days worked in the termination month.
    pub balance_of_salary: Decimal,
    /// Vacation entitlement earned in completed years.
    pub vested_vacation_pay: Decimal,
    /// Vacation entitlement accrued in the current year.
    pub pro_rated_vacation_pay: Decimal,
    /// Year-end bonus accrued in the current year.
    pub pro_rated_year_end_bonus: Decimal,
    /// Notice period paid in lieu.
    pub notice_indemnity: Decimal,
    /// Employer penalty on the severance fund balance.
    pub severance_fund_penalty: Decimal,
    /// Severance fund balance released to the employee.
    pub severance_fund_withdrawal: Decimal,
    /// Social security withheld from the settlement.
    pub social_security_withholding: Decimal,
    /// Income tax withheld from the settlement.
    pub income_tax_withholding: Decimal,
    /// Manual deductions.
    pub other_deductions: Decimal,
    /// Sum of all credit lines.
    pub gross_total: Decimal,
    /// Gross total less all deductions.
    pub net_total: Decimal,
}

impl SettlementBreakdown {
    /// Sum of the lines subtracted from the gross total.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn total_deductions(&self) -> Decimal {
        self.social_security_withholding
            .saturating_add(self.income_tax_withholding)
            .saturating_add(self.other_deductions)
    }

    /// Returns a copy with every amount rounded for presentation.
    ///
    /// Totals are rounded independently from their exact values, not
    /// re-summed from rounded lines.
    pub fn rounded(&self) -> SettlementBreakdown {
        SettlementBreakdown {
            balance_of_salary: round_money(self.balance_of_salary),
            vested_vacation_pay: round_money(self.vested_vacation_pay),
            pro_rated_vacation_pay: round_money(self.pro_rated_vacation_pay),
            pro_rated_year_end_bonus: round_money(self.pro_rated_year_end_bonus),
            notice_indemnity: round_money(self.notice_indemnity),
            severance_fund_penalty: round_money(self.severance_fund_penalty),
            severance_fund_withdrawal: round_money(self.severance_fund_withdrawal),
            social_security_withholding: round_money(self.social_security_withholding),
            income_tax_withholding: round_money(self.income_tax_withholding),
            other_deductions: round_money(self.other_deductions),
            gross_total: round_money(self.gross_total),
            net_total: round_money(self.net_total),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Everything a settlement calculation produces.
///
/// Contains no clock readings or identifiers, so two calculations over the
/// same inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCalculation {
    /// The tenure the settlement was derived from.
    pub tenure: Tenure,
    /// The settlement lines and totals (unrounded).
    pub breakdown: SettlementBreakdown,
    /// Audit steps in pipeline order.
    pub steps: Vec<AuditStep>,
    /// Non-fatal conditions noticed during the calculation.
    pub warnings: Vec<AuditWarning>,
}
