//! `/v1/auth/*` and `/oauth2/token`.

use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use store::{SessionInfo, USERNAME_KEY};

use crate::client::{parse_envelope, ApiClient};
use crate::error::ApiError;

pub const ACCOUNT_NOT_COMPLETE: &str = "account_not_complete";

/// Result of `POST /v1/auth/verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Verified,
    /// Signed in, but email verification or profile details are missing.
    Incomplete,
    Rejected,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VerifyBody {
    success: Option<bool>,
    message: Option<String>,
}

impl SessionStatus {
    fn from_body(body: &VerifyBody) -> Self {
        match (body.success, body.message.as_deref()) {
            (Some(true), Some(ACCOUNT_NOT_COMPLETE)) => SessionStatus::Incomplete,
            (Some(true), _) => SessionStatus::Verified,
            _ => SessionStatus::Rejected,
        }
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    grant_type: &'a str,
    scope: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mfa_code: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionIssued {
    pub message: Option<String>,
    /// The account still needs the finish-profile step.
    pub onboarding_redirect: bool,
}

impl ApiClient {
    /// Check the cookie session. Any non-JSON or transport failure is an
    /// error; the caller decides how to treat it.
    pub async fn verify_session(&self) -> Result<SessionStatus, ApiError> {
        let builder = self.request(Method::POST, "/v1/auth/verify").json(&json!({}));
        let (_, body) = self.send_raw(builder).await?;
        let body: VerifyBody = serde_json::from_value(body).unwrap_or_default();
        Ok(SessionStatus::from_body(&body))
    }

    /// Exchange the refresh cookie for a new session.
    pub async fn refresh_session(&self) -> Result<SessionIssued, ApiError> {
        let username = self.identity().username.clone();
        self.post(
            "/oauth2/token",
            &TokenRequest {
                username: &username,
                password: None,
                grant_type: "refresh",
                scope: "internal",
                mfa_code: None,
            },
        )
        .await
    }

    /// The password grant as a request. The backend reads the account from
    /// the username header, so it carries the name being signed in, not the
    /// stored one.
    fn password_grant(&self, username: &str, password: &str, mfa_code: Option<&str>) -> RequestBuilder {
        let username = username.trim();
        let client = self.with_identity(SessionInfo {
            device_id: self.identity().device_id.clone(),
            username: username.to_string(),
        });
        let body = TokenRequest {
            username,
            password: Some(password),
            grant_type: "password",
            scope: "internal",
            mfa_code: mfa_code.filter(|c| !c.is_empty()),
        };
        client.request(Method::POST, "/oauth2/token").json(&body)
    }

    /// Password grant. Returns the raw backend error (e.g. `mfa_required`)
    /// so the sign-in flow can branch on it.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
        mfa_code: Option<&str>,
    ) -> Result<SessionIssued, ApiError> {
        let builder = self.password_grant(username, password, mfa_code);
        let (status, raw) = self.send_raw(builder).await?;
        // The token endpoint answers 401 for MFA prompts and bad passwords
        // alike; keep those as plain backend messages.
        let raw = parse_envelope(status, raw).map_err(|e| match e {
            ApiError::Unauthorized(message) => ApiError::Backend(message),
            other => other,
        })?;
        Ok(serde_json::from_value(raw)?)
    }

    pub async fn revoke_session(&self) -> Result<(), ApiError> {
        let username = self.identity().username.clone();
        let _: serde_json::Value = self
            .post(
                "/oauth2/token",
                &TokenRequest {
                    username: &username,
                    password: None,
                    grant_type: "revoke",
                    scope: "internal",
                    mfa_code: None,
                },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_body_mapping() {
        let status = |v: serde_json::Value| {
            SessionStatus::from_body(&serde_json::from_value(v).unwrap())
        };
        assert_eq!(status(json!({"success": true})), SessionStatus::Verified);
        assert_eq!(
            status(json!({"success": true, "message": "account_not_complete"})),
            SessionStatus::Incomplete
        );
        assert_eq!(status(json!({"error": "invalid token"})), SessionStatus::Rejected);
        assert_eq!(status(json!({"success": false})), SessionStatus::Rejected);
    }

    #[test]
    fn test_token_request_shape() {
        let body = serde_json::to_value(TokenRequest {
            username: "albert@ufl.edu",
            password: Some("Aa1!aaaa"),
            grant_type: "password",
            scope: "internal",
            mfa_code: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"username": "albert@ufl.edu", "password": "Aa1!aaaa", "grant_type": "password", "scope": "internal"})
        );
    }

    #[test]
    fn test_password_grant_sends_typed_username() {
        let signed_out = ApiClient::new(
            "http://localhost:8080",
            SessionInfo { device_id: "dev-1".into(), username: String::new() },
        );
        let request = signed_out
            .password_grant(" albert@ufl.edu ", "Aa1!aaaa", Some("123456"))
            .build()
            .unwrap();
        assert_eq!(request.url().path(), "/oauth2/token");
        assert_eq!(request.headers()[USERNAME_KEY], "albert@ufl.edu");
        assert_eq!(request.headers()[store::DEVICE_ID_KEY], "dev-1");

        let body: serde_json::Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body["username"], "albert@ufl.edu");
        assert_eq!(body["mfa_code"], "123456");
    }

    #[test]
    fn test_password_grant_replaces_previous_account() {
        let previous = ApiClient::new(
            "http://localhost:8080",
            SessionInfo { device_id: "dev-1".into(), username: "old@ufl.edu".into() },
        );
        let request = previous.password_grant("new@ufl.edu", "pw", None).build().unwrap();
        assert_eq!(request.headers()[USERNAME_KEY], "new@ufl.edu");
        assert_eq!(previous.identity().username, "old@ufl.edu");
    }
}
