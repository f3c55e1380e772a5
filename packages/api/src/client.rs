//! # Backend HTTP client
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the backend base URL and the
//! identity header pair from [`store::SessionInfo`]. Every request:
//!
//! - sends `X-GatorPool-Device-Id` / `X-GatorPool-Username` plus JSON
//!   content-type and accept headers;
//! - carries the cookie session (`credentials: include` in the browser, a
//!   cookie store on native);
//! - reads the body as JSON whatever the status, then runs it through
//!   [`parse_envelope`] so callers only see typed payloads or an [`ApiError`].
//!
//! Endpoint methods live in [`crate::endpoints`], grouped by backend service.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{SessionInfo, DEVICE_ID_KEY, USERNAME_KEY};

use crate::error::ApiError;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    identity: SessionInfo,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, identity: SessionInfo) -> Self {
        Self {
            http: build_http(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity,
        }
    }

    pub fn identity(&self) -> &SessionInfo {
        &self.identity
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Same connection pool and cookies, different identity headers.
    pub fn with_identity(&self, identity: SessionInfo) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            identity,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(DEVICE_ID_KEY, &self.identity.device_id)
            .header(USERNAME_KEY, &self.identity.username)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json");
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    /// Send and return the status with the raw JSON body. An empty body reads
    /// as `null`.
    pub(crate) async fn send_raw(&self, builder: RequestBuilder) -> Result<(u16, Value), ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("request failed: {}", e);
            ApiError::from(e)
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok((status, Value::Null));
        }
        let body = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("non-JSON body (status {}): {}", status, e);
            ApiError::Decode(e.to_string())
        })?;
        Ok((status, body))
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.send_raw(builder).await?;
        let body = parse_envelope(status, body)?;
        serde_json::from_value(body).map_err(|e| {
            tracing::error!("response shape mismatch: {}", e);
            ApiError::Decode(e.to_string())
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", path);
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("PUT {}", path);
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("DELETE {}", path);
        self.send(self.request(Method::DELETE, path)).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http() -> reqwest::Client {
    reqwest::Client::new()
}

/// Map a backend response body onto success or the error taxonomy.
///
/// Failure bodies carry `error` (sometimes `message`) and frequently omit
/// `success` altogether, so a 2xx without an `error` key is accepted.
pub fn parse_envelope(status: u16, body: Value) -> Result<Value, ApiError> {
    let success = body.get("success").and_then(Value::as_bool);
    let error = body
        .get("error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty());

    let ok_status = (200..300).contains(&status);
    if success == Some(true) || (ok_status && success.is_none() && error.is_none()) {
        return Ok(body);
    }

    let message = error
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("request failed with status {status}"));

    if status == 401 || is_session_error(&message) {
        Err(ApiError::Unauthorized(message))
    } else {
        Err(ApiError::Backend(message))
    }
}

fn is_session_error(message: &str) -> bool {
    message.contains("no account in context")
        || message.contains("session")
        || message.contains("token")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_passes_through() {
        let body = json!({"success": true, "trips": []});
        assert_eq!(parse_envelope(200, body.clone()), Ok(body));
    }

    #[test]
    fn test_error_without_success_field() {
        let err = parse_envelope(500, json!({"error": "error finding trips"})).unwrap_err();
        assert_eq!(err, ApiError::Backend("error finding trips".into()));
    }

    #[test]
    fn test_success_false_with_ok_status() {
        let err = parse_envelope(200, json!({"success": false, "error": "trip is full"})).unwrap_err();
        assert_eq!(err.message(), "trip is full");
    }

    #[test]
    fn test_unauthorized_status_and_messages() {
        let err = parse_envelope(401, json!({"error": "mfa_required"})).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("mfa_required".into()));

        let err = parse_envelope(500, json!({"error": "no account in context"})).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_missing_error_text_uses_status() {
        let err = parse_envelope(502, Value::Null).unwrap_err();
        assert_eq!(err.message(), "request failed with status 502");
    }

    #[test]
    fn test_plain_ok_body_is_accepted() {
        let body = json!({"application_uuid": "abc"});
        assert_eq!(parse_envelope(200, body.clone()), Ok(body));
    }

    #[test]
    fn test_url_join() {
        let client = ApiClient::new("http://localhost:8080/", SessionInfo::default());
        assert_eq!(client.url("/v1/auth/verify"), "http://localhost:8080/v1/auth/verify");
        assert_eq!(client.url("v1/trip/"), "http://localhost:8080/v1/trip/");
    }
}
