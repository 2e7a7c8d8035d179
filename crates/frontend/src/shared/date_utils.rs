/// Utilities for date and time formatting
///
/// Timestamps are shown in UTC so the same log reads identically everywhere.
use chrono::{Datelike, NaiveDate, Utc};
use contracts::domain::common::parse_instant;

/// Format a log timestamp as `DD/MM/YYYY, HH:MM:SS`
/// Example: "2025-10-23T10:00:00Z" -> "23/10/2025, 10:00:00"
///
/// Unparseable input is returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_instant(datetime_str) {
        Some(instant) => instant.format("%d/%m/%Y, %H:%M:%S").to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2025-10-23" or "2025-10-23T10:00:00Z" -> "23/10/2025"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// `(year, month)` of the current UTC date.
pub fn current_month() -> (i32, u32) {
    let today = Utc::now().date_naive();
    (today.year(), today.month())
}

/// "2025-09" -> "September 2025"
pub fn format_period(period_id: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{}-01", period_id.trim()), "%Y-%m-%d") {
        Ok(date) => date.format("%B %Y").to_string(),
        Err(_) => period_id.to_string(),
    }
}
