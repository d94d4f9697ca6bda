//! Employee model.
//!
//! This module defines [`EmployeeFacts`], the employment facts a settlement
//! is derived from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The employment facts needed to compute a termination settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFacts {
    /// Unique identifier for the employee.
    pub id: String,
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// The date the employee was hired.
    pub admission_date: NaiveDate,
}

impl EmployeeFacts {
    /// Creates a validated set of employee facts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when `base_salary` is not
    /// strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use settlement_engine::models::EmployeeFacts;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = EmployeeFacts::new(
    ///     "emp_001",
    ///     Decimal::new(800000, 2),
    ///     NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(employee.base_salary, Decimal::new(8000, 0));
    ///
    /// assert!(EmployeeFacts::new(
    ///     "emp_002",
    ///     Decimal::new(-100, 0),
    ///     NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(),
    /// )
    /// .is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        base_salary: Decimal,
        admission_date: NaiveDate,
    ) -> EngineResult<Self> {
        let employee = Self {
            id: id.into(),
            base_salary,
            admission_date,
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Checks the invariants that do not depend on a termination request.
    pub fn validate(&self) -> EngineResult<()> {
        if self.base_salary <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "base_salary",
                format!("must be greater than zero, got {}", self.base_salary),
            ));
        }
        Ok(())
    }
}
