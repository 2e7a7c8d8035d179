//! Session persistence in `localStorage`. A no-op off the browser.

use super::context::SessionUser;

const SESSION_KEY: &str = "radio_session";

#[cfg(target_arch = "wasm32")]
fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Save session to localStorage
#[cfg(target_arch = "wasm32")]
pub fn save_session(user: &SessionUser) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(user) {
        Ok(json) => {
            let _ = storage.set_item(SESSION_KEY, &json);
        }
        Err(e) => log::warn!("session: failed to serialize: {}", e),
    }
}

/// Restore session from localStorage
#[cfg(target_arch = "wasm32")]
pub fn load_session() -> Option<SessionUser> {
    let raw = get_local_storage()?.get_item(SESSION_KEY).ok()??;
    decode_session(&raw)
}

#[cfg(target_arch = "wasm32")]
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_session(_user: &SessionUser) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_session() -> Option<SessionUser> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_session() {}

/// A stored value that no longer decodes is treated as "not logged in".
pub fn decode_session(raw: &str) -> Option<SessionUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("session: discarding stored session: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::users::UserRole;

    #[test]
    fn test_decode_session() {
        let user = decode_session(r#"{"username":"root","role":"admin"}"#).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.station, None);
        assert!(decode_session("{not json").is_none());
    }
}
