//! Core data models for the Settlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod report;
mod settlement;
mod termination;

pub use employee::EmployeeFacts;
pub use report::{ReportFilter, SettlementReport, SettlementSummaryEntry, TypeTotals};
pub use settlement::{
    AuditStep, AuditTrace, AuditWarning, MAX_MONEY_INPUT, MONEY_DECIMAL_PLACES, SettlementBreakdown,
    SettlementCalculation, Tenure, format_money, round_money,
};
pub use termination::{
    DEFAULT_NOTICE_PERIOD_DAYS, TerminationRequest, TerminationType, parse_date,
};
