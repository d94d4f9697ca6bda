//! Settlement report aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ReportFilter, SettlementReport, SettlementSummaryEntry, TypeTotals};

/// Aggregates computed settlements into a report.
///
/// Entries outside `filter` are dropped. The remaining entries are summed
/// overall and per termination type, and returned most recent termination
/// first. Ties keep their input order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] on the `settlements` field when a
/// total cannot be represented.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::summarize_settlements;
/// use settlement_engine::models::{ReportFilter, SettlementSummaryEntry, TerminationType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entries = vec![SettlementSummaryEntry {
///     employee_id: "emp_001".to_string(),
///     termination_type: TerminationType::WithoutCause,
///     termination_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     gross_total: Decimal::new(5000, 0),
///     net_total: Decimal::new(4450, 0),
/// }];
///
/// let report = summarize_settlements(&entries, &ReportFilter::default()).unwrap();
/// assert_eq!(report.total_settlements, 1);
/// assert_eq!(report.total_net, Decimal::new(4450, 0));
/// ```
pub fn summarize_settlements(
    entries: &[SettlementSummaryEntry],
    filter: &ReportFilter,
) -> EngineResult<SettlementReport> {
    let mut included: Vec<SettlementSummaryEntry> = entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect();
    included.sort_by(|a, b| b.termination_date.cmp(&a.termination_date));

    let mut total_gross = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;
    let mut by_type: BTreeMap<_, TypeTotals> = BTreeMap::new();

    for entry in &included {
        total_gross = add(total_gross, entry.gross_total, &entry.employee_id)?;
        total_net = add(total_net, entry.net_total, &entry.employee_id)?;
        let totals = by_type.entry(entry.termination_type).or_default();
        totals.count += 1;
        totals.net_total = add(totals.net_total, entry.net_total, &entry.employee_id)?;
    }

    Ok(SettlementReport {
        filter: filter.clone(),
        total_settlements: u32::try_from(included.len()).unwrap_or(u32::MAX),
        total_gross,
        total_net,
        by_type,
        entries: included,
    })
}

fn add(total: Decimal, amount: Decimal, employee_id: &str) -> EngineResult<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        EngineError::invalid_input(
            "settlements",
            format!("totals overflow when adding the entry for {}", employee_id),
        )
    })
}
