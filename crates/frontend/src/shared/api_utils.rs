//! API utilities for frontend-backend communication
//!
//! Builds URLs against the configured base and funnels every request through
//! one place, so auth headers, status checks and decoding stay uniform.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::ClientConfig;
use super::http::{
    decode_json, decode_list, decode_optional, ApiError, ApiRequest, ApiResponse, HttpTransport,
    Method,
};
use crate::system::auth::context::SessionContext;

/// Port the station API listens on when the base URL is derived from the page location.
const DEFAULT_API_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// Uses `[api] base_url` when configured; otherwise derives it from the
/// current window location.
pub fn api_base(config: &ClientConfig) -> String {
    if let Some(base) = config.api.base_url.as_deref() {
        let trimmed = base.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    location_base()
}

#[cfg(target_arch = "wasm32")]
fn location_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

#[cfg(not(target_arch = "wasm32"))]
fn location_base() -> String {
    format!("http://127.0.0.1:{}", DEFAULT_API_PORT)
}

/// Percent-encode one path segment (usernames, period ids).
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    transport: Rc<dyn HttpTransport>,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>, transport: Rc<dyn HttpTransport>, session: SessionContext) -> Self {
        Self {
            base_url: Rc::from(base_url.as_ref().trim_end_matches('/')),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full API URL from a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get_json<T>(&self, path: &str) -> LocalBoxFuture<'static, Result<T, ApiError>>
    where
        T: DeserializeOwned + 'static,
    {
        let response = self.send(Method::Get, path, None);
        Box::pin(async move { decode_json(&response.await?.body) })
    }

    pub fn get_optional<T>(&self, path: &str) -> LocalBoxFuture<'static, Result<Option<T>, ApiError>>
    where
        T: DeserializeOwned + 'static,
    {
        let response = self.send(Method::Get, path, None);
        Box::pin(async move { decode_optional(&response.await?.body) })
    }

    pub fn get_list<T>(&self, path: &str) -> LocalBoxFuture<'static, Result<Vec<T>, ApiError>>
    where
        T: DeserializeOwned + 'static,
    {
        let response = self.send(Method::Get, path, None);
        Box::pin(async move { decode_list(&response.await?.body) })
    }

    pub fn post_json<B, T>(&self, path: &str, body: &B) -> LocalBoxFuture<'static, Result<T, ApiError>>
    where
        B: Serialize,
        T: DeserializeOwned + 'static,
    {
        self.send_with_body(Method::Post, path, body)
    }

    pub fn put_json<B, T>(&self, path: &str, body: &B) -> LocalBoxFuture<'static, Result<T, ApiError>>
    where
        B: Serialize,
        T: DeserializeOwned + 'static,
    {
        self.send_with_body(Method::Put, path, body)
    }

    pub fn delete(&self, path: &str) -> LocalBoxFuture<'static, Result<(), ApiError>> {
        let response = self.send(Method::Delete, path, None);
        Box::pin(async move {
            response.await?;
            Ok(())
        })
    }

    fn send_with_body<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> LocalBoxFuture<'static, Result<T, ApiError>>
    where
        B: Serialize,
        T: DeserializeOwned + 'static,
    {
        let body = match serde_json::to_string(body) {
            Ok(body) => body,
            Err(e) => {
                let error = ApiError::Decode(format!("Failed to serialize request: {}", e));
                return Box::pin(async move { Err(error) });
            }
        };
        let response = self.send(method, path, Some(body));
        Box::pin(async move { decode_json(&response.await?.body) })
    }

    /// Issue the request now; non-2xx responses become [`ApiError::Http`].
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            body,
            bearer: self.session.access_token(),
        };
        log::debug!("{} {}", request.method.as_str(), request.url);
        let pending = self.transport.send(request);
        Box::pin(async move {
            let response = pending.await?;
            if !response.is_success() {
                return Err(ApiError::from_response(&response));
            }
            Ok(response)
        })
    }
}
