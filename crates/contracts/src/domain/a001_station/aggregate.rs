use serde::{Deserialize, Serialize};

use crate::domain::a002_historical_record::HistoricalRecord;
use crate::domain::common::{AggregateId, ContentLogEntry};
use crate::shared::compliance::{compute_summary_with, ComplianceSummary, TaxPolicy};
use crate::shared::serde_utils::lenient_f64;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор радиостанции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub i64);

impl StationId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for StationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(StationId)
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Радиостанция вместе с эфирным логом текущего периода
///
/// Owned by the remote service; the client only ever holds a cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "streamUrl", alias = "stream_url", alias = "url", default)]
    pub stream_url: String,
    #[serde(
        rename = "baseTax",
        alias = "base_tax",
        default,
        deserialize_with = "lenient_f64"
    )]
    pub base_tax: f64,
    #[serde(rename = "contentLog", alias = "content_log", default)]
    pub content_log: Vec<ContentLogEntry>,
    #[serde(rename = "historicalRecords", alias = "historical_records", default)]
    pub historical_records: Vec<HistoricalRecord>,
}

impl Station {
    /// Compliance summary of the whole cached content log.
    pub fn summary(&self, policy: &TaxPolicy) -> ComplianceSummary {
        compute_summary_with(&self.content_log, self.base_tax, policy)
    }

    pub fn historical_record(&self, period_id: &str) -> Option<&HistoricalRecord> {
        self.historical_records
            .iter()
            .find(|record| record.period_id == period_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ContentOrigin;

    #[test]
    fn test_station_decodes_camel_and_snake_case() {
        let camel: Station = serde_json::from_str(
            r#"{"id":1,"name":"Peace FM","streamUrl":"http://s/peace","baseTax":5000,
                "contentLog":[{"timestamp":"2025-10-23T10:00:00Z","title":"Africa","artist":"Shatta Wale","origin":"Local"}]}"#,
        )
        .unwrap();
        let snake: Station = serde_json::from_str(
            r#"{"id":1,"name":"Peace FM","url":"http://s/peace","base_tax":"5000",
                "content_log":[{"timestamp":"2025-10-23T10:00:00Z","title":"Africa","artist":"Shatta Wale","origin":"Local"}]}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.id, StationId(1));
        assert_eq!(camel.content_log[0].origin, ContentOrigin::Local);
        assert!(camel.historical_records.is_empty());
    }

    #[test]
    fn test_lightweight_station_without_log() {
        let station: Station = serde_json::from_str(r#"{"id":7,"name":"Citi FM"}"#).unwrap();
        assert!(station.content_log.is_empty());
        assert_eq!(station.base_tax, 0.0);
        let summary = station.summary(&TaxPolicy::default());
        assert_eq!(summary.total_tax, 0.0);
    }

    #[test]
    fn test_station_id_from_route_param() {
        assert_eq!(StationId::from_string(" 12 ").unwrap(), StationId(12));
        assert!(StationId::from_string("abc").is_err());
        assert_eq!(StationId(3).as_string(), "3");
    }
}
