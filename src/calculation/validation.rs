//! Input validation for settlement calculations.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeFacts, MAX_MONEY_INPUT, TerminationRequest};

/// Checks every precondition of a settlement calculation.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming the first offending field:
/// - `base_salary` when the salary is not strictly positive or exceeds
///   [`MAX_MONEY_INPUT`]
/// - `termination_date` when it falls before the admission date
/// - `other_deductions` when it is negative or exceeds [`MAX_MONEY_INPUT`]
pub fn validate_inputs(employee: &EmployeeFacts, request: &TerminationRequest) -> EngineResult<()> {
    employee.validate()?;
    check_magnitude("base_salary", employee.base_salary)?;

    if request.termination_date < employee.admission_date {
        return Err(EngineError::invalid_input(
            "termination_date",
            format!(
                "termination date {} is before admission date {}",
                request.termination_date, employee.admission_date
            ),
        ));
    }

    if request.other_deductions < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "other_deductions",
            format!("must not be negative, got {}", request.other_deductions),
        ));
    }
    check_magnitude("other_deductions", request.other_deductions)?;

    Ok(())
}

fn check_magnitude(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount > Decimal::from(MAX_MONEY_INPUT) {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", MAX_MONEY_INPUT, amount),
        ));
    }
    Ok(())
}
