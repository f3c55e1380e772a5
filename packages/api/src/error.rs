//! Error taxonomy shared by every backend and geocoder call.
//!
//! | Variant | Raised when | UI reaction |
//! |---------|-------------|-------------|
//! | [`ApiError::Unauthorized`] | HTTP 401 or a session/token error message | redirect to `/auth/signin` |
//! | [`ApiError::Validation`] | client-side checks failed, nothing was sent | inline message |
//! | [`ApiError::Backend`] | `success: false` or a non-2xx body with `error` | show the text verbatim |
//! | [`ApiError::Transport`] | the request never produced a response | generic "try again later" |
//! | [`ApiError::Decode`] | the response body did not match the expected shape | generic "try again later" |

use thiserror::Error;

pub const GENERIC_ERROR: &str = "An error occurred. Please try again later.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Backend(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message the backend (or validator) produced, without decoration.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::Validation(m)
            | ApiError::Backend(m)
            | ApiError::Transport(m)
            | ApiError::Decode(m) => m,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Text safe to put in front of a user. Transport and decode failures
    /// collapse to [`GENERIC_ERROR`].
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) | ApiError::Decode(_) => GENERIC_ERROR.to_string(),
            other => other.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// A wizard step or form refused to advance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_details() {
        let err = ApiError::Transport("dns error: failed to lookup".into());
        assert_eq!(err.user_message(), GENERIC_ERROR);

        let err = ApiError::Backend("driver application already exists".into());
        assert_eq!(err.user_message(), "driver application already exists");
    }

    #[test]
    fn test_validation_converts() {
        let err: ApiError = ValidationError::new("seats", "Seats must be a number").into();
        assert_eq!(err, ApiError::Validation("Seats must be a number".into()));
        assert!(!err.is_unauthorized());
    }
}
