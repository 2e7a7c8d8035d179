//! Transport seam and the client-side error taxonomy.

use contracts::shared::validation::ValidationError;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON body, already serialized.
    pub body: Option<String>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", "application/json".to_string())];
        if self.body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
        }
        if let Some(token) = &self.bearer {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request was superseded or torn down. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
    #[error("{0}")]
    Network(String),
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Http { status: u16, detail: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not authenticated")]
    NotAuthenticated,
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Build the error for a non-2xx response, keeping any structured `detail`.
    pub fn from_response(response: &ApiResponse) -> Self {
        ApiError::Http {
            status: response.status,
            detail: extract_detail(&response.body),
        }
    }
}

/// `detail` is either a message or a list of `{ "msg": ... }` objects.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.trim().to_string()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                })
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

pub trait HttpTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>>;
}

// ============================================================================
// Decoding
// ============================================================================

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Single entity that may legitimately be absent (`null` or empty body).
pub fn decode_optional<T: DeserializeOwned>(body: &str) -> Result<Option<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    decode_json::<Option<T>>(body)
}

/// List payloads: anything that is not a JSON array decodes as an empty list,
/// malformed items are skipped.
pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = decode_json(body)?;
    let Value::Array(items) = value else {
        log::warn!("expected a JSON array, got another shape; using an empty list");
        return Ok(Vec::new());
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() < total {
        log::warn!("skipped {} malformed list item(s)", total - decoded.len());
    }
    Ok(decoded)
}

// ============================================================================
// Browser transport
// ============================================================================

/// `fetch` via gloo-net. Dropping the returned future aborts the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

struct AbortOnDrop {
    controller: web_sys::AbortController,
    armed: bool,
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abort();
        }
    }
}

impl HttpTransport for GlooTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        use gloo_net::http::Request;

        Box::pin(async move {
            let controller = web_sys::AbortController::new()
                .map_err(|_| ApiError::Network("AbortController is not available".into()))?;
            let mut guard = AbortOnDrop {
                controller,
                armed: true,
            };
            let signal = guard.controller.signal();

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in request.headers() {
                builder = builder.header(name, &value);
            }
            builder = builder.abort_signal(Some(&signal));

            let sent = match request.body {
                Some(body) => builder
                    .body(body)
                    .map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?
                    .send()
                    .await,
                None => builder.send().await,
            };
            let response = sent.map_err(map_gloo_error)?;
            let status = response.status();
            let body = response.text().await.map_err(map_gloo_error)?;
            guard.armed = false;

            Ok(ApiResponse { status, body })
        })
    }
}

fn map_gloo_error(error: gloo_net::Error) -> ApiError {
    let message = error.to_string();
    if message.contains("AbortError") {
        ApiError::Cancelled
    } else {
        ApiError::Network(format!("Failed to send request: {}", message))
    }
}
