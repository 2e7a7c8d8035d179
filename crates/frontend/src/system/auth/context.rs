use contracts::domain::a001_station::StationId;
use contracts::system::auth::LoginResponse;
use contracts::system::users::UserRole;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Logged-in user as the client remembers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub role: UserRole,
    #[serde(default)]
    pub station: Option<StationId>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl SessionUser {
    pub fn from_login(username: &str, response: &LoginResponse) -> Self {
        Self {
            username: response
                .username
                .clone()
                .unwrap_or_else(|| username.to_string()),
            role: response.role,
            station: response.station.as_ref().map(|s| s.id()),
            access_token: Some(response.access_token.clone()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Which stations the current user may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationScope {
    All,
    Single(StationId),
    Nothing,
}

impl StationScope {
    pub fn station_id(&self) -> Option<StationId> {
        match self {
            StationScope::Single(id) => Some(*id),
            _ => None,
        }
    }
}

/// Session passed explicitly into hooks and API clients.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    user: RwSignal<Option<SessionUser>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
        }
    }

    pub fn with_user(user: SessionUser) -> Self {
        Self {
            user: RwSignal::new(Some(user)),
        }
    }

    /// Reactive handle for rendering code.
    pub fn user(&self) -> RwSignal<Option<SessionUser>> {
        self.user
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.user.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with_untracked(|u| u.is_some())
    }

    pub fn sign_in(&self, user: SessionUser) {
        log::info!("session: signed in as {} ({})", user.username, user.role.as_str());
        self.user.set(Some(user));
    }

    pub fn sign_out(&self) {
        log::info!("session: signed out");
        self.user.set(None);
    }

    pub fn access_token(&self) -> Option<String> {
        self.user
            .with_untracked(|u| u.as_ref().and_then(|u| u.access_token.clone()))
    }

    /// Username sent as the acting user on user-management calls.
    pub fn acting_username(&self) -> Option<String> {
        self.user.with_untracked(|u| u.as_ref().map(|u| u.username.clone()))
    }

    /// Tracked, so a signal built on top of it follows login and logout.
    pub fn station_scope(&self) -> StationScope {
        self.user.with(|u| match u {
            Some(user) if user.is_admin() => StationScope::All,
            Some(SessionUser {
                station: Some(id), ..
            }) => StationScope::Single(*id),
            _ => StationScope::Nothing,
        })
    }
}
