pub mod aggregate;

pub use aggregate::{filter_records_by_month, HistoricalRecord, PaymentStatus};
