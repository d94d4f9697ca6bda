//! Calculation logic for the Settlement Engine.
//!
//! This module contains one function per settlement rule (tenure, balance
//! of salary, vacation pay, year-end bonus, notice indemnity, severance fund
//! and withholding), the pipeline that chains them, and the report
//! aggregation over computed settlements.

mod notice_indemnity;
mod report;
mod salary_balance;
mod settlement;
mod severance_fund;
mod tenure;
mod vacation_pay;
mod validation;
mod withholding;
mod year_end_bonus;

pub use notice_indemnity::{NOTICE_FLAG_IGNORED, NoticeIndemnityResult, calculate_notice_indemnity};
pub use report::summarize_settlements;
pub use salary_balance::{SalaryBalanceResult, calculate_salary_balance};
pub use settlement::{NET_TOTAL_NEGATIVE, compute, compute_settlement};
pub use severance_fund::{SeveranceFundResult, calculate_severance_fund};
pub use tenure::{MONTHS_PER_YEAR, TenureResult, calculate_tenure};
pub use vacation_pay::{VacationPayResult, calculate_vacation_pay};
pub use validation::validate_inputs;
pub use withholding::{WithholdingResult, calculate_withholding};
pub use year_end_bonus::{YearEndBonusResult, calculate_year_end_bonus};
