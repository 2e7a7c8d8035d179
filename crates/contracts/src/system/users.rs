use serde::{Deserialize, Serialize};

use crate::domain::a001_station::{StationId, StationRef};
use crate::shared::validation::{require, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[serde(alias = "Admin")]
    Admin,
    #[serde(alias = "Station")]
    Station,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Station => "station",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "station_id", alias = "stationId")]
    pub station: Option<StationRef>,
}

impl User {
    pub fn station_id(&self) -> Option<StationId> {
        self.station.as_ref().map(StationRef::id)
    }
}

/// Тело запроса `POST /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub station: Option<StationId>,
}

impl CreateUserDto {
    /// Trim and check the request before it is sent.
    ///
    /// Station users must name their station; blank e-mail becomes `None`.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let username = require(&self.username, "username")?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        if self.role == UserRole::Station && self.station.is_none() {
            return Err(ValidationError::MissingStation);
        }
        let email = self
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Ok(Self {
            username,
            email,
            ..self
        })
    }
}

/// Частичное обновление пользователя (`PUT /users/{username}/{acting}`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<StationId>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.station.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(username) = &self.username {
            require(username, "username")?;
        }
        if matches!(&self.password, Some(p) if p.is_empty()) {
            return Err(ValidationError::Required("password"));
        }
        Ok(())
    }
}
