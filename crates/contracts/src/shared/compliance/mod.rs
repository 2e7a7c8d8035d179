//! Tax computation for station content logs.
//!
//! The surcharge rule: for every percentage point of foreign content above
//! the threshold, `surcharge_rate_per_point` of the base tax is added.
//! With the default policy (30%, 0.015) a station airing 40% foreign
//! content on a base tax of 1000 pays `10 * 0.015 * 1000 = 150` on top.

use serde::{Deserialize, Serialize};

use crate::domain::common::{ContentLogEntry, ContentOrigin};

pub const DEFAULT_THRESHOLD: f64 = 30.0;
pub const DEFAULT_SURCHARGE_RATE_PER_POINT: f64 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxPolicy {
    /// Foreign-content percentage that is still surcharge-free (inclusive).
    pub threshold: f64,
    pub surcharge_rate_per_point: f64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            surcharge_rate_per_point: DEFAULT_SURCHARGE_RATE_PER_POINT,
        }
    }
}

/// Итоги по налогу за период
///
/// Always satisfies `total_tax == base_tax + surcharge`, and `surcharge == 0`
/// whenever `foreign_percentage` does not exceed the threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub local_count: usize,
    #[serde(default)]
    pub foreign_count: usize,
    #[serde(default, alias = "foreign_percentage")]
    pub foreign_percentage: f64,
    #[serde(default)]
    pub surcharge: f64,
    #[serde(default, alias = "total_tax")]
    pub total_tax: f64,
    #[serde(default, alias = "base_tax")]
    pub base_tax: f64,
    #[serde(default, alias = "paid_on")]
    pub paid_on: Option<String>,
}

impl ComplianceSummary {
    pub fn is_over_threshold(&self, policy: &TaxPolicy) -> bool {
        self.foreign_percentage > policy.threshold
    }

    pub fn breakdown(&self) -> OriginBreakdown {
        OriginBreakdown {
            local: self.local_count,
            foreign: self.foreign_count,
        }
    }
}

/// Local/foreign split of a content log, as fed to origin charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OriginBreakdown {
    pub local: usize,
    pub foreign: usize,
}

impl OriginBreakdown {
    pub fn slices(&self) -> [(&'static str, usize); 2] {
        [("Local Content", self.local), ("Foreign Content", self.foreign)]
    }
}

/// Compliance summary under the default policy.
pub fn compute_summary(log: &[ContentLogEntry], base_tax: f64) -> ComplianceSummary {
    compute_summary_with(log, base_tax, &TaxPolicy::default())
}

/// Compliance summary under an explicit policy.
///
/// Negative or non-finite base tax is treated as zero.
pub fn compute_summary_with(
    log: &[ContentLogEntry],
    base_tax: f64,
    policy: &TaxPolicy,
) -> ComplianceSummary {
    let base_tax = sanitize_amount(base_tax);
    let total_count = log.len();
    let foreign_count = log
        .iter()
        .filter(|entry| entry.origin == ContentOrigin::Foreign)
        .count();
    let local_count = total_count - foreign_count;

    let foreign_percentage = if total_count > 0 {
        100.0 * foreign_count as f64 / total_count as f64
    } else {
        0.0
    };

    let surcharge = if foreign_percentage > policy.threshold {
        let excess = foreign_percentage - policy.threshold;
        sanitize_amount(excess * policy.surcharge_rate_per_point * base_tax)
    } else {
        0.0
    };

    ComplianceSummary {
        total_count,
        local_count,
        foreign_count,
        foreign_percentage,
        surcharge,
        total_tax: base_tax + surcharge,
        base_tax,
        paid_on: None,
    }
}

fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
