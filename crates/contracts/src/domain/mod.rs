pub mod a001_station;
pub mod a002_historical_record;
pub mod common;
