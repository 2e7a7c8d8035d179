use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use futures::future::LocalBoxFuture;
use serde::Serialize;

use crate::shared::api_utils::{path_segment, ApiClient};
use crate::shared::http::ApiError;

/// `skip`/`limit` paging of `GET /users`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsersPage {
    pub skip: usize,
    pub limit: usize,
}

impl Default for UsersPage {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

/// Fetch one page of users
pub fn fetch_users(client: &ApiClient, page: &UsersPage) -> LocalBoxFuture<'static, Result<Vec<User>, ApiError>> {
    match serde_qs::to_string(page) {
        Ok(query) => client.get_list(&format!("/users?{}", query)),
        Err(e) => {
            let error = ApiError::Decode(format!("Failed to encode query: {}", e));
            Box::pin(async move { Err(error) })
        }
    }
}

/// Create new user
pub fn create_user(
    client: &ApiClient,
    dto: CreateUserDto,
) -> Result<LocalBoxFuture<'static, Result<User, ApiError>>, ApiError> {
    let dto = dto.validated()?;
    Ok(client.post_json("/users", &dto))
}

/// Update user on behalf of `acting_username`
pub fn update_user(
    client: &ApiClient,
    acting_username: Option<&str>,
    username: &str,
    dto: &UpdateUserDto,
) -> Result<LocalBoxFuture<'static, Result<User, ApiError>>, ApiError> {
    let acting = acting_username.ok_or(ApiError::NotAuthenticated)?;
    dto.validate()?;
    Ok(client.put_json(
        &format!("/users/{}/{}", path_segment(username), path_segment(acting)),
        dto,
    ))
}

/// Delete user on behalf of `acting_username`
pub fn delete_user(
    client: &ApiClient,
    acting_username: Option<&str>,
    username: &str,
) -> Result<LocalBoxFuture<'static, Result<(), ApiError>>, ApiError> {
    let acting = acting_username.ok_or(ApiError::NotAuthenticated)?;
    Ok(client.delete(&format!(
        "/users/{}/{}",
        path_segment(username),
        path_segment(acting)
    )))
}
