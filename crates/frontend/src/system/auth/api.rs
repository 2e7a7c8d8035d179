use contracts::system::auth::{LoginRequest, LoginResponse};

use super::context::{SessionContext, SessionUser};
use super::storage;
use crate::shared::api_utils::ApiClient;
use crate::shared::http::ApiError;

/// Login with username and password
///
/// Credentials are validated before anything is sent; on success the session
/// is signed in and persisted.
pub async fn login(
    client: &ApiClient,
    session: SessionContext,
    username: &str,
    password: &str,
) -> Result<SessionUser, ApiError> {
    let request = LoginRequest::new(username, password)?;
    let response: LoginResponse = client.post_json("/users/login", &request).await?;
    let user = SessionUser::from_login(&request.username, &response);
    storage::save_session(&user);
    session.sign_in(user.clone());
    Ok(user)
}

pub fn logout(session: SessionContext) {
    storage::clear_session();
    session.sign_out();
}

/// Restore a previously stored session, if any.
pub fn restore(session: SessionContext) -> bool {
    match storage::load_session() {
        Some(user) => {
            session.sign_in(user);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{with_owner, ScriptedTransport};
    use contracts::shared::validation::ValidationError;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_login_signs_in() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let transport = ScriptedTransport::new();
            let session = SessionContext::new();
            let client = ApiClient::new("http://api", transport.clone(), session);
            let outcome = Rc::new(RefCell::new(None));

            let slot = outcome.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = login(&client, session, "root", "pw").await;
                    *slot.borrow_mut() = Some(result);
                })
                .unwrap();
            pool.run_until_stalled();

            assert_eq!(transport.request_count(), 1);
            let request = transport.request(0);
            assert_eq!(request.url, "http://api/users/login");
            assert!(request.body.unwrap().contains("\"username\":\"root\""));

            transport.respond(0, 200, r#"{"access_token":"t1","role":"admin"}"#);
            pool.run_until_stalled();

            let user = outcome.borrow_mut().take().unwrap().unwrap();
            assert!(user.is_admin());
            assert_eq!(session.access_token().as_deref(), Some("t1"));

            logout(session);
            assert!(!session.is_authenticated());
        });
    }

    #[test]
    fn test_login_rejects_blank_credentials() {
        with_owner(|| {
            let mut pool = LocalPool::new();
            let transport = ScriptedTransport::new();
            let session = SessionContext::new();
            let client = ApiClient::new("http://api", transport.clone(), session);
            let outcome = Rc::new(RefCell::new(None));

            let slot = outcome.clone();
            pool.spawner()
                .spawn_local(async move {
                    *slot.borrow_mut() = Some(login(&client, session, "  ", "pw").await);
                })
                .unwrap();
            pool.run_until_stalled();

            assert_eq!(transport.request_count(), 0);
            assert_eq!(
                outcome.borrow_mut().take().unwrap().unwrap_err(),
                ApiError::Validation(ValidationError::Required("username"))
            );
        });
    }
}
