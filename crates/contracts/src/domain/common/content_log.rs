use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::origin::ContentOrigin;

/// Одна запись эфирного лога станции
///
/// Entries are immutable once logged and may arrive in any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentLogEntry {
    pub timestamp: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub origin: ContentOrigin,
}

impl ContentLogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        origin: ContentOrigin,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            title: title.into(),
            artist: artist.into(),
            origin,
        }
    }

    /// Timestamp as an instant, `None` when the stored string is not ISO-8601.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.timestamp)
    }
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Offsets are honoured; timestamps without an offset are read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Entries logged during the given calendar month (UTC).
///
/// Entries with unparseable timestamps are dropped.
pub fn content_log_for_month(log: &[ContentLogEntry], year: i32, month: u32) -> Vec<ContentLogEntry> {
    log.iter()
        .filter(|entry| {
            entry
                .instant()
                .map(|ts| ts.year() == year && ts.month() == month)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}
