//! User management: paged list, writes and display rows

use contracts::domain::a001_station::Station;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserRole};
use futures::future::LocalBoxFuture;

use super::api::{self, UsersPage};
use crate::domain::a001_station::hooks::StationNames;
use crate::shared::api_utils::ApiClient;
use crate::shared::app_context::AppContext;
use crate::shared::config::LookupSection;
use crate::shared::http::ApiError;
use crate::shared::loader::{Loader, ResourceKey};
use crate::shared::mutation::Mutation;
use crate::system::auth::context::SessionContext;

impl ResourceKey for UsersPage {
    fn is_resolved(&self) -> bool {
        self.limit > 0
    }
}

pub type UsersLoader = Loader<UsersPage, Vec<User>>;

pub fn use_users(ctx: &AppContext, page: UsersPage) -> UsersLoader {
    let client = ctx.api.clone();
    let loader = Loader::new("users", ctx.runtime.clone(), ctx.min_visible_ms(), move |page: &UsersPage| {
        api::fetch_users(&client, page)
    });
    loader.set_key(page);
    loader
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub username: String,
    /// `Admin` / `Station`
    pub role: String,
    pub email: String,
    pub station: String,
}

fn role_label(role: UserRole) -> String {
    match role {
        UserRole::Admin => "Admin".to_string(),
        UserRole::Station => "Station".to_string(),
    }
}

/// Display rows; station names come from the embedded reference or the lookup cache.
pub fn user_rows(users: &[User], names: &StationNames, labels: &LookupSection) -> Vec<UserRow> {
    users
        .iter()
        .map(|user| {
            let station = match (user.role, &user.station) {
                (UserRole::Admin, _) => "Admin".to_string(),
                (UserRole::Station, Some(station)) => match station.name() {
                    Some(name) => name.to_string(),
                    None => names.display(&station.id(), labels),
                },
                (UserRole::Station, None) => labels.unavailable_label.clone(),
            };
            UserRow {
                username: user.username.clone(),
                role: role_label(user.role),
                email: user.email.clone().unwrap_or_default(),
                station,
            }
        })
        .collect()
}

/// Stations already loaded elsewhere need no lookup.
pub fn seed_station_names(names: &StationNames, stations: &[Station]) {
    for station in stations {
        names.seed(station.id, station.name.clone());
    }
}

/// User writes; the acting user comes from the session.
#[derive(Clone)]
pub struct UserActions {
    client: ApiClient,
    session: SessionContext,
    users: Option<UsersLoader>,
    pub create: Mutation,
    pub update: Mutation,
    pub delete: Mutation,
}

impl UserActions {
    pub fn new(ctx: &AppContext, users: Option<UsersLoader>) -> Self {
        Self {
            client: ctx.api.clone(),
            session: ctx.session,
            users,
            create: Mutation::new("create_user"),
            update: Mutation::new("update_user"),
            delete: Mutation::new("delete_user"),
        }
    }

    pub fn create(&self, dto: CreateUserDto) -> LocalBoxFuture<'static, Result<User, ApiError>> {
        let request = self.create.submit(api::create_user(&self.client, dto));
        let users = self.users.clone();
        Box::pin(async move {
            let user = request.await?;
            if let Some(users) = &users {
                let created = user.clone();
                users.update_data(move |list| list.push(created));
            }
            Ok(user)
        })
    }

    pub fn update(&self, username: &str, dto: UpdateUserDto) -> LocalBoxFuture<'static, Result<User, ApiError>> {
        let acting = self.session.acting_username();
        let request = self
            .update
            .submit(api::update_user(&self.client, acting.as_deref(), username, &dto));
        let users = self.users.clone();
        let original = username.to_string();
        Box::pin(async move {
            let user = request.await?;
            if let Some(users) = &users {
                let updated = user.clone();
                users.update_data(move |list| {
                    if let Some(slot) = list.iter_mut().find(|u| u.username == original) {
                        *slot = updated;
                    }
                });
            }
            Ok(user)
        })
    }

    pub fn delete(&self, username: &str) -> LocalBoxFuture<'static, Result<(), ApiError>> {
        let acting = self.session.acting_username();
        let request = self
            .delete
            .submit(api::delete_user(&self.client, acting.as_deref(), username));
        let users = self.users.clone();
        let removed = username.to_string();
        Box::pin(async move {
            request.await?;
            if let Some(users) = &users {
                users.update_data(move |list| list.retain(|u| u.username != removed));
            }
            Ok(())
        })
    }
}
