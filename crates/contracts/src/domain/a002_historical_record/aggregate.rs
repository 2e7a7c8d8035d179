use serde::{Deserialize, Serialize};

use crate::domain::common::ContentLogEntry;
use crate::shared::compliance::{compute_summary_with, ComplianceSummary, TaxPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(alias = "paid", alias = "PAID")]
    Paid,
    #[serde(alias = "due", alias = "DUE")]
    Due,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Due => "Due",
        }
    }
}

/// Закрытый расчётный период станции
///
/// Created server-side when a billing period closes and never changed after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Human label, e.g. "September 2025".
    #[serde(default)]
    pub period: String,
    /// Period key, e.g. "2025-09".
    #[serde(rename = "periodId", alias = "period_id")]
    pub period_id: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub summary: ComplianceSummary,
    #[serde(rename = "contentLog", alias = "content_log", default)]
    pub content_log: Vec<ContentLogEntry>,
}

impl HistoricalRecord {
    /// `(year, month)` parsed from `period_id`.
    pub fn period_month(&self) -> Option<(i32, u32)> {
        let (year, month) = self.period_id.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.get(..2).unwrap_or(month).parse::<u32>().ok()?;
        if (1..=12).contains(&month) {
            Some((year, month))
        } else {
            None
        }
    }

    /// Summary recomputed from the record's own log against the given base tax.
    ///
    /// The stored payment date is carried over.
    pub fn recompute_summary(&self, base_tax: f64, policy: &TaxPolicy) -> ComplianceSummary {
        let mut summary = compute_summary_with(&self.content_log, base_tax, policy);
        summary.paid_on = self.summary.paid_on.clone();
        summary
    }
}

/// Records for the selected month, or all of them when no month is selected.
pub fn filter_records_by_month(
    records: &[HistoricalRecord],
    month: Option<(i32, u32)>,
) -> Vec<HistoricalRecord> {
    match month {
        None => records.to_vec(),
        Some(selected) => records
            .iter()
            .filter(|record| record.period_month() == Some(selected))
            .cloned()
            .collect(),
    }
}
