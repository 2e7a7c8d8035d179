use serde::{Deserialize, Serialize};

use crate::domain::a001_station::StationRef;
use crate::shared::validation::{require, ValidationError};
use crate::system::users::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = require(username, "username")?;
        if password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(Self {
            username,
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub role: UserRole,
    #[serde(default, alias = "station_id")]
    pub station: Option<StationRef>,
}
