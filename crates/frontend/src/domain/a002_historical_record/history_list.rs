//! Station history page: month filter over closed billing periods.

use contracts::domain::a002_historical_record::{filter_records_by_month, HistoricalRecord, PaymentStatus};

use crate::shared::date_utils::format_period;
use crate::shared::number_format::{format_money, format_percent};

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub period_id: String,
    pub period: String,
    pub status: PaymentStatus,
    pub foreign_percentage: String,
    pub total_tax: String,
    pub paid_on: Option<String>,
}

impl From<&HistoricalRecord> for HistoryRow {
    fn from(record: &HistoricalRecord) -> Self {
        let period = if record.period.trim().is_empty() {
            format_period(&record.period_id)
        } else {
            record.period.clone()
        };
        Self {
            period_id: record.period_id.clone(),
            period,
            status: record.status,
            foreign_percentage: format_percent(record.summary.foreign_percentage, 2),
            total_tax: format_money(record.summary.total_tax),
            paid_on: record.summary.paid_on.clone(),
        }
    }
}

/// Rows for the selected month (all when `None`), in the order the API sent them.
pub fn history_rows(records: &[HistoricalRecord], month: Option<(i32, u32)>) -> Vec<HistoryRow> {
    filter_records_by_month(records, month)
        .iter()
        .map(HistoryRow::from)
        .collect()
}

/// Months that have a record, newest first; feeds the month picker.
pub fn available_months(records: &[HistoricalRecord]) -> Vec<(i32, u32)> {
    let mut months: Vec<(i32, u32)> = records.iter().filter_map(HistoricalRecord::period_month).collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();
    months
}
