//! Withholding calculations.
//!
//! Social security is withheld on the gross subtotal (every credit line
//! except the severance fund). Income tax withholding is not modelled and is
//! always zero.

use rust_decimal::Decimal;

use crate::config::SettlementRules;
use crate::models::{AuditStep, format_money};

/// The result of the withholding calculation.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Social security withheld from the subtotal.
    pub social_security_withholding: Decimal,
    /// Income tax withheld. Always zero.
    pub income_tax_withholding: Decimal,
    /// Audit steps for social security and income tax, in that order.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates social security and income tax withholding on `gross_subtotal`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_withholding;
/// use settlement_engine::config::SettlementRules;
/// use rust_decimal::Decimal;
///
/// let result = calculate_withholding(Decimal::new(1000, 0), &SettlementRules::default(), 1);
/// assert_eq!(result.social_security_withholding, Decimal::new(110, 0));
/// assert_eq!(result.income_tax_withholding, Decimal::ZERO);
/// ```
pub fn calculate_withholding(
    gross_subtotal: Decimal,
    rules: &SettlementRules,
    step_number: u32,
) -> WithholdingResult {
    let rate = rules.social_security_rate(gross_subtotal);
    let social_security_withholding = gross_subtotal * rate;

    let social_security_step = AuditStep {
        step_number,
        rule_id: "social_security_withholding".to_string(),
        rule_name: "Social Security Withholding".to_string(),
        input: serde_json::json!({
            "gross_subtotal": gross_subtotal.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_security_withholding": social_security_withholding.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            format_money(gross_subtotal),
            rate.normalize(),
            format_money(social_security_withholding)
        ),
    };

    let income_tax_withholding = Decimal::ZERO;
    let income_tax_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "income_tax_withholding".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        input: serde_json::json!({
            "gross_subtotal": gross_subtotal.normalize().to_string()
        }),
        output: serde_json::json!({
            "income_tax_withholding": "0"
        }),
        reasoning: "Income tax is not withheld on settlements".to_string(),
    };

    WithholdingResult {
        social_security_withholding,
        income_tax_withholding,
        audit_steps: vec![social_security_step, income_tax_step],
    }
}
