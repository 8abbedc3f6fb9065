//! REST Client
//!
//! Thin `fetch` wrappers per resource, organized by domain. Every call returns
//! `ApiResult`; callers log and toast failures, nothing here retries.

mod auth;
mod documents;
mod subscriptions;
mod loans;
mod master;
mod users;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::{config, session};

// Re-export all public items
pub use auth::*;
pub use documents::*;
pub use subscriptions::*;
pub use loans::*;
pub use master::*;
pub use users::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session expired, please sign in again")]
    Unauthorized,

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),

    #[error("Browser error: {0}")]
    Js(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        ApiError::Js(js_message(&value))
    }
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Some endpoints wrap payloads as `{"data": ...}`, others return them bare
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// Pull a human-readable message out of an error body
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error", "detail"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<'))
                .then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Decode a response body; an empty body reads as JSON `null`
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn response_text(response: &Response) -> ApiResult<String> {
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

async fn send(method: Method, path: &str, body: Option<String>) -> ApiResult<String> {
    let url = config::current().url(path);

    let init = RequestInit::new();
    init.set_method(method.as_str());
    init.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url, &init)?;
    let headers = request.headers();
    headers.set("Accept", "application/json")?;
    if body.is_some() {
        headers.set("Content-Type", "application/json")?;
    }
    let token = session::token();
    if let Some(token) = &token {
        headers.set("Authorization", &format!("Bearer {}", token))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Js("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ApiError::Decode("fetch did not return a Response".into()))?;

    let status = response.status();
    let text = response_text(&response).await?;
    log::debug!("[API] {} {} -> {}", method.as_str(), path, status);

    if response.ok() {
        return Ok(text);
    }
    let err = status_error(status, &response.status_text(), &text, token.is_some());
    if err == ApiError::Unauthorized {
        session::clear();
    }
    log::warn!("[API] {} {} failed: {}", method.as_str(), path, err);
    Err(err)
}

/// Error for a non-2xx response. A 401 only means the session expired when a
/// token was sent; otherwise (a failed login) the backend's message is kept.
pub(crate) fn status_error(status: u16, status_text: &str, body: &str, sent_token: bool) -> ApiError {
    if status == 401 && sent_token {
        return ApiError::Unauthorized;
    }
    ApiError::Status {
        status,
        message: error_message(body, status_text),
    }
}

fn encode<B: Serialize>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let text = send(Method::Get, path, None).await?;
    decode_body(&text)
}

pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ApiResult<T> {
    let text = send(Method::Post, path, Some(encode(body)?)).await?;
    decode_body(&text)
}

pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> ApiResult<T> {
    let text = send(Method::Put, path, Some(encode(body)?)).await?;
    decode_body(&text)
}

pub(crate) async fn delete(path: &str) -> ApiResult<()> {
    send(Method::Delete, path, None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_decode_bare_and_wrapped() {
        let bare: Vec<Row> = decode_body(r#"[{"id":1},{"id":2}]"#).unwrap();
        let wrapped: Vec<Row> = decode_body(r#"{"data":[{"id":1},{"id":2}]}"#).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_decode_empty_body() {
        let unit: () = decode_body("").unwrap();
        assert_eq!(unit, ());
        let none: Option<Row> = decode_body("  ").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_decode_error() {
        let result: ApiResult<Vec<Row>> = decode_body(r#"{"rows":[]}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_401_without_token_keeps_backend_message() {
        let err = status_error(401, "Unauthorized", r#"{"message":"Invalid username or password"}"#, false);
        assert_eq!(
            err,
            ApiError::Status { status: 401, message: "Invalid username or password".into() }
        );
        assert_eq!(err.to_string(), "Invalid username or password (HTTP 401)");
    }

    #[test]
    fn test_401_with_token_is_session_expiry() {
        let err = status_error(401, "Unauthorized", r#"{"message":"jwt expired"}"#, true);
        assert_eq!(err, ApiError::Unauthorized);
    }

    #[test]
    fn test_other_statuses_ignore_token() {
        let err = status_error(403, "Forbidden", "", true);
        assert_eq!(err, ApiError::Status { status: 403, message: "Forbidden".into() });
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(error_message(r#"{"message":"Duplicate name"}"#, "Bad Request"), "Duplicate name");
        assert_eq!(error_message(r#"{"error":"No such loan"}"#, "Not Found"), "No such loan");
        assert_eq!(error_message("plain failure", "Internal"), "plain failure");
        assert_eq!(error_message("<html>oops</html>", "Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("", "Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status { status: 409, message: "Duplicate name".into() };
        assert_eq!(err.to_string(), "Duplicate name (HTTP 409)");
    }
}
