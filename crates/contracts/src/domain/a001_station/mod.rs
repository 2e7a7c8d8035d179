pub mod aggregate;
pub mod dto;

pub use aggregate::{Station, StationId};
pub use dto::{CreateStationDto, StationRef, StationSummaryDto};
