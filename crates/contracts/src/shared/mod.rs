pub mod compliance;
pub mod serde_utils;
pub mod validation;
