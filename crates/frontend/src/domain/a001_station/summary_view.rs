//! Display model for compliance figures (dashboard cards, station page).

use contracts::domain::a001_station::{Station, StationSummaryDto};
use contracts::domain::common::{content_log_for_month, ContentLogEntry};
use contracts::shared::compliance::{compute_summary_with, ComplianceSummary, OriginBreakdown, TaxPolicy};

use crate::shared::number_format::{format_money, format_percent};

/// Formatted summary, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    /// `"34.00%"`
    pub foreign_percentage: String,
    /// Station cards show one decimal: `"34.0%"`
    pub card_percentage: String,
    pub base_tax: String,
    pub surcharge: String,
    pub total_tax: String,
    pub songs_played: usize,
    /// Picks the warning colour.
    pub over_threshold: bool,
    pub breakdown: OriginBreakdown,
}

impl SummaryView {
    pub fn from_summary(summary: &ComplianceSummary, policy: &TaxPolicy) -> Self {
        Self {
            foreign_percentage: format_percent(summary.foreign_percentage, 2),
            card_percentage: format_percent(summary.foreign_percentage, 1),
            base_tax: format_money(summary.base_tax),
            surcharge: format_money(summary.surcharge),
            total_tax: format_money(summary.total_tax),
            songs_played: summary.total_count,
            over_threshold: summary.is_over_threshold(policy),
            breakdown: summary.breakdown(),
        }
    }

    /// Server-computed dashboard row.
    pub fn from_dto(dto: &StationSummaryDto, policy: &TaxPolicy) -> Self {
        let foreign = dto.foreign_logs.min(dto.total_logs);
        Self {
            foreign_percentage: format_percent(dto.foreign_percentage, 2),
            card_percentage: format_percent(dto.foreign_percentage, 1),
            base_tax: format_money(dto.base_tax),
            surcharge: format_money(dto.surcharge),
            total_tax: format_money(dto.total_tax),
            songs_played: dto.total_logs,
            over_threshold: dto.foreign_percentage > policy.threshold,
            breakdown: OriginBreakdown {
                local: dto.total_logs - foreign,
                foreign,
            },
        }
    }
}

/// A station's figures for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStationView {
    pub month_log: Vec<ContentLogEntry>,
    pub summary: ComplianceSummary,
    pub view: SummaryView,
}

impl MonthlyStationView {
    pub fn new(station: &Station, (year, month): (i32, u32), policy: &TaxPolicy) -> Self {
        let month_log = content_log_for_month(&station.content_log, year, month);
        let summary = compute_summary_with(&month_log, station.base_tax, policy);
        let view = SummaryView::from_summary(&summary, policy);
        Self {
            month_log,
            summary,
            view,
        }
    }
}
