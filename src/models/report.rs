//! Settlement report models.
//!
//! A report summarises settlements that were already computed, filtered by
//! termination period and type.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TerminationType;

/// One computed settlement, as fed into a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummaryEntry {
    /// The employee the settlement belongs to.
    pub employee_id: String,
    /// How the employment ended.
    pub termination_type: TerminationType,
    /// The last day of employment.
    pub termination_date: NaiveDate,
    /// The settlement's gross total.
    pub gross_total: Decimal,
    /// The settlement's net total.
    pub net_total: Decimal,
}

/// Which settlements a report covers. Every bound is optional and inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Earliest termination date to include.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Latest termination date to include.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Only include this termination type.
    #[serde(default)]
    pub termination_type: Option<TerminationType>,
}

impl ReportFilter {
    /// Returns true if the entry falls within this filter.
    pub fn matches(&self, entry: &SettlementSummaryEntry) -> bool {
        self.from.is_none_or(|from| entry.termination_date >= from)
            && self.to.is_none_or(|to| entry.termination_date <= to)
            && self
                .termination_type
                .is_none_or(|t| entry.termination_type == t)
    }
}

/// Count and net value of the settlements of one termination type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTotals {
    /// Number of settlements.
    pub count: u32,
    /// Sum of their net totals.
    pub net_total: Decimal,
}

/// Aggregated view over a set of settlements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// The filter the report was produced with.
    pub filter: ReportFilter,
    /// Number of settlements included.
    pub total_settlements: u32,
    /// Sum of gross totals.
    pub total_gross: Decimal,
    /// Sum of net totals.
    pub total_net: Decimal,
    /// Totals per termination type.
    pub by_type: BTreeMap<TerminationType, TypeTotals>,
    /// Included settlements, most recent termination first.
    pub entries: Vec<SettlementSummaryEntry>,
}
