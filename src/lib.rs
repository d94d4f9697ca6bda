//! Termination Settlement Engine
//!
//! This crate computes the severance settlement owed when an employment
//! relationship ends: balance of salary, vacation pay, year-end bonus,
//! notice indemnity, severance fund penalty and withdrawal, withholdings and
//! the resulting gross and net totals, with an audit trail for every line.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
