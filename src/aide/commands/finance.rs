use crate::commands::{CmdMessage, CmdResult};
use crate::dates::{format_date, format_money};
use crate::error::{AideError, Result};
use crate::model::FinanceRecord;
use crate::store::{csv_io, Collection, StorageBackend};
use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};

/// Sums over a set of finance records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportTotals {
    /// Sum of negative amounts (zero or below).
    pub expense: f64,
    /// Sum of positive amounts, i.e. `balance - expense`.
    pub income: f64,
    /// Sum of all amounts.
    pub balance: f64,
}

impl ReportTotals {
    pub fn from_records(records: &[FinanceRecord]) -> Self {
        let expense: f64 = records
            .iter()
            .filter(|r| r.is_expense())
            .map(|r| r.amount)
            .sum();
        let balance: f64 = records.iter().map(|r| r.amount).sum();
        Self {
            expense,
            income: balance - expense,
            balance,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FinanceReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: Vec<FinanceRecord>,
    pub totals: ReportTotals,
    /// The CSV file holding `records`.
    pub path: PathBuf,
}

pub fn add<B: StorageBackend>(
    finance: &mut Collection<FinanceRecord, B>,
    amount: f64,
    category: String,
    date: NaiveDate,
    description: String,
) -> Result<CmdResult<FinanceRecord>> {
    if !amount.is_finite() {
        return Err(AideError::InvalidInput(format!(
            "Amount must be a finite number, got {}",
            amount
        )));
    }
    let record = finance.add(|id| FinanceRecord::new(id, amount, category, date, description))?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Finance record created ({}): {} {}",
        record.id, record.category, record.amount
    )));
    Ok(result.with_affected(vec![record]))
}

/// Records whose category is one of `categories` (case-insensitive), or all
/// records when `categories` is empty.
pub fn list<B: StorageBackend>(
    finance: &Collection<FinanceRecord, B>,
    categories: &[String],
) -> CmdResult<FinanceRecord> {
    let wanted: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    let listed = finance
        .list()
        .iter()
        .filter(|r| wanted.is_empty() || wanted.contains(&r.category.to_lowercase()))
        .cloned()
        .collect();
    CmdResult::default().with_listed(listed)
}

/// Sum of every amount in the collection.
pub fn balance<B: StorageBackend>(finance: &Collection<FinanceRecord, B>) -> f64 {
    finance.list().iter().map(|r| r.amount).sum()
}

/// Select records dated within `[start, end]`, write them to
/// `report_<start>_<end>.csv` in `report_dir` and compute totals.
///
/// Returns `None`, and writes nothing, when no record falls in the range.
pub fn generate_report<B: StorageBackend>(
    finance: &Collection<FinanceRecord, B>,
    start: NaiveDate,
    end: NaiveDate,
    report_dir: &Path,
) -> Result<Option<FinanceReport>> {
    let records: Vec<FinanceRecord> = finance
        .list()
        .iter()
        .filter(|r| start <= r.date && r.date <= end)
        .cloned()
        .collect();

    if records.is_empty() {
        return Ok(None);
    }

    let path = report_dir.join(format!(
        "report_{}_{}.csv",
        format_date(&start),
        format_date(&end)
    ));
    csv_io::write_records(&path, &records)?;
    info!(
        "Wrote finance report with {} record(s) to {}",
        records.len(),
        path.display()
    );

    let totals = ReportTotals::from_records(&records);
    Ok(Some(FinanceReport {
        start,
        end,
        records,
        totals,
        path,
    }))
}

/// [`generate_report`] wrapped into user-facing messages.
pub fn report<B: StorageBackend>(
    finance: &Collection<FinanceRecord, B>,
    start: NaiveDate,
    end: NaiveDate,
    report_dir: &Path,
    currency: &str,
) -> Result<CmdResult<FinanceRecord>> {
    let mut result = CmdResult::default();
    let Some(report) = generate_report(finance, start, end, report_dir)? else {
        result.add_message(CmdMessage::warning(format!(
            "No records found between {} and {}",
            format_date(&start),
            format_date(&end)
        )));
        return Ok(result);
    };

    result.add_message(CmdMessage::info(format!(
        "Finance report {} to {}",
        format_date(&report.start),
        format_date(&report.end)
    )));
    result.add_message(CmdMessage::info(format!(
        "  Income:   {}",
        format_money(report.totals.income, currency)
    )));
    result.add_message(CmdMessage::info(format!(
        "  Expenses: {}",
        format_money(report.totals.expense, currency)
    )));
    result.add_message(CmdMessage::info(format!(
        "  Balance:  {}",
        format_money(report.totals.balance, currency)
    )));
    result.add_message(CmdMessage::success(format!(
        "Details saved to {}",
        report.path.display()
    )));
    Ok(result.with_listed(report.records))
}
