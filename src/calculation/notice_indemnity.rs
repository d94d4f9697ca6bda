//! Notice indemnity calculation.
//!
//! Only a dismissal without cause with the notice period paid in lieu earns
//! an indemnity. For every other termination type the flag is ignored and a
//! warning is raised so the caller can see it had no effect.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, TerminationRequest, format_money};

/// Warning code raised when `notice_indemnified` has no effect.
pub const NOTICE_FLAG_IGNORED: &str = "NOTICE_FLAG_IGNORED";

/// The result of a notice indemnity calculation.
#[derive(Debug, Clone)]
pub struct NoticeIndemnityResult {
    /// The notice indemnity (one monthly salary, or zero).
    pub notice_indemnity: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when the request asked for an indemnity it is not entitled to.
    pub warning: Option<AuditWarning>,
}

/// Calculates the notice indemnity.
///
/// Returns `base_salary` when the termination is without cause and
/// `notice_indemnified` is set, otherwise zero.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_notice_indemnity;
/// use settlement_engine::models::{TerminationRequest, TerminationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
///
/// let dismissal = TerminationRequest::new(TerminationType::WithoutCause, date, true);
/// let result = calculate_notice_indemnity(Decimal::new(8000, 0), &dismissal, 1);
/// assert_eq!(result.notice_indemnity, Decimal::new(8000, 0));
///
/// let resignation = TerminationRequest::new(TerminationType::EmployeeResignation, date, true);
/// let result = calculate_notice_indemnity(Decimal::new(8000, 0), &resignation, 1);
/// assert_eq!(result.notice_indemnity, Decimal::ZERO);
/// assert!(result.warning.is_some());
/// ```
pub fn calculate_notice_indemnity(
    base_salary: Decimal,
    request: &TerminationRequest,
    step_number: u32,
) -> NoticeIndemnityResult {
    let entitled = request.is_without_cause() && request.notice_indemnified;
    let notice_indemnity = if entitled { base_salary } else { Decimal::ZERO };

    let reasoning = if entitled {
        format!(
            "Dismissal without cause with notice paid in lieu ({} days): one monthly salary = {}",
            request.notice_period_days,
            format_money(notice_indemnity)
        )
    } else if request.is_without_cause() {
        format!(
            "Notice period of {} days worked, no indemnity",
            request.notice_period_days
        )
    } else {
        format!(
            "{} does not earn a notice indemnity",
            request.termination_type
        )
    };

    let warning = if request.notice_indemnified && !request.is_without_cause() {
        Some(AuditWarning {
            code: NOTICE_FLAG_IGNORED.to_string(),
            message: format!(
                "noticeIndemnified is only honoured for WITHOUT_CAUSE, ignored for {}",
                request.termination_type
            ),
            severity: "low".to_string(),
        })
    } else {
        None
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "notice_indemnity".to_string(),
        rule_name: "Notice Indemnity".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "termination_type": request.termination_type,
            "notice_indemnified": request.notice_indemnified,
            "notice_period_days": request.notice_period_days,
            "notice_date": request.notice_date
        }),
        output: serde_json::json!({
            "notice_indemnity": notice_indemnity.normalize().to_string()
        }),
        reasoning,
    };

    NoticeIndemnityResult {
        notice_indemnity,
        audit_step,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TerminationType;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(termination_type: TerminationType, indemnified: bool) -> TerminationRequest {
        TerminationRequest::new(
            termination_type,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            indemnified,
        )
    }

    #[test]
    fn test_without_cause_indemnified_pays_one_salary() {
        let result = calculate_notice_indemnity(
            dec("8000.00"),
            &request(TerminationType::WithoutCause, true),
            1,
        );
        assert_eq!(result.notice_indemnity, dec("8000.00"));
        assert!(result.warning.is_none());
        assert!(result.audit_step.reasoning.contains("8000.00"));
    }

    #[test]
    fn test_without_cause_worked_notice_pays_nothing() {
        let result = calculate_notice_indemnity(
            dec("8000.00"),
            &request(TerminationType::WithoutCause, false),
            1,
        );
        assert_eq!(result.notice_indemnity, Decimal::ZERO);
        assert!(result.warning.is_none());
        assert!(result.audit_step.reasoning.contains("30 days worked"));
    }

    #[test]
    fn test_other_types_never_pay() {
        for termination_type in [
            TerminationType::WithCause,
            TerminationType::EmployeeResignation,
            TerminationType::MutualAgreement,
        ] {
            for indemnified in [true, false] {
                let result = calculate_notice_indemnity(
                    dec("5000"),
                    &request(termination_type, indemnified),
                    1,
                );
                assert_eq!(result.notice_indemnity, Decimal::ZERO);
                assert_eq!(result.warning.is_some(), indemnified);
            }
        }
    }

    #[test]
    fn test_ignored_flag_warning_content() {
        let result = calculate_notice_indemnity(
            dec("5000"),
            &request(TerminationType::WithCause, true),
            3,
        );
        let warning = result.warning.unwrap();
        assert_eq!(warning.code, NOTICE_FLAG_IGNORED);
        assert_eq!(warning.severity, "low");
        assert!(warning.message.contains("WITH_CAUSE"));
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_audit_records_notice_period() {
        let mut req = request(TerminationType::WithoutCause, true);
        req.notice_period_days = 45;
        let result = calculate_notice_indemnity(dec("5000"), &req, 1);
        assert_eq!(
            result.audit_step.input["notice_period_days"].as_u64().unwrap(),
            45
        );
        assert_eq!(
            result.audit_step.input["termination_type"].as_str().unwrap(),
            "WITHOUT_CAUSE"
        );
    }
}
