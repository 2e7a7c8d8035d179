//! Common types shared by station-related aggregates

pub mod aggregate_id;
pub mod content_log;
pub mod origin;

// Re-exports
pub use aggregate_id::AggregateId;
pub use content_log::{content_log_for_month, parse_instant, ContentLogEntry};
pub use origin::ContentOrigin;
