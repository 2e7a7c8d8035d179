use serde::{Deserialize, Serialize};

use super::aggregate::StationId;
use crate::shared::serde_utils::lenient_f64;
use crate::shared::validation::{parse_amount, require, ValidationError};

/// Тело запроса `POST /stations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStationDto {
    pub name: String,
    pub url: String,
    pub base_tax: f64,
}

impl CreateStationDto {
    /// Build the request from raw form input, rejecting it before any network call.
    pub fn from_form(name: &str, url: &str, base_tax: &str) -> Result<Self, ValidationError> {
        let dto = Self {
            name: require(name, "name")?,
            url: require(url, "stream URL")?,
            base_tax: parse_amount(base_tax, "base tax")?,
        };
        Ok(dto)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.url, "stream URL")?;
        if !self.base_tax.is_finite() {
            return Err(ValidationError::NotANumber("base tax"));
        }
        if self.base_tax < 0.0 {
            return Err(ValidationError::Negative("base tax"));
        }
        Ok(())
    }
}

/// Reference to a station as embedded in users and login responses.
///
/// The API sends either a bare id or a (partial) station object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationRef {
    Id(StationId),
    Record {
        id: StationId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl StationRef {
    pub fn id(&self) -> StationId {
        match self {
            StationRef::Id(id) => *id,
            StationRef::Record { id, .. } => *id,
        }
    }

    /// Display name when the reference already carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            StationRef::Id(_) => None,
            StationRef::Record { name, .. } => name.as_deref().filter(|n| !n.is_empty()),
        }
    }
}

/// Строка сводки `GET /stations/dashboard/summary`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationSummaryDto {
    #[serde(default)]
    pub id: Option<StationId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "baseTax", deserialize_with = "lenient_f64")]
    pub base_tax: f64,
    #[serde(default, alias = "totalLogs")]
    pub total_logs: usize,
    #[serde(default, alias = "foreignLogs")]
    pub foreign_logs: usize,
    #[serde(default, alias = "foreignPercentage", deserialize_with = "lenient_f64")]
    pub foreign_percentage: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub surcharge: f64,
    #[serde(default, alias = "totalTax", deserialize_with = "lenient_f64")]
    pub total_tax: f64,
}
