//! Email/password sign-in with the one-time-code second step.

use crate::endpoints::SessionIssued;
use crate::error::{ApiError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInStep {
    Credentials,
    /// The backend asked for the emailed one-time code.
    Otp,
    SignedIn { onboarding_redirect: bool },
}

/// MFA outcomes the token endpoint reports through its error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MfaChallenge {
    Required,
    CodeRequired,
    Expired,
    AttemptsExceeded,
    InvalidCode { attempts_left: u32 },
}

impl MfaChallenge {
    pub fn parse(message: &str) -> Option<Self> {
        match message.trim() {
            "mfa_required" => Some(MfaChallenge::Required),
            "mfa_code_required" => Some(MfaChallenge::CodeRequired),
            "mfa_expired" => Some(MfaChallenge::Expired),
            "mfa_attempts_exceeded" => Some(MfaChallenge::AttemptsExceeded),
            other => {
                let rest = other.strip_prefix("Invalid mfa code. You have ")?;
                let count = rest.strip_suffix(" attempts left.")?;
                count
                    .parse()
                    .ok()
                    .map(|attempts_left| MfaChallenge::InvalidCode { attempts_left })
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            MfaChallenge::Required => "We emailed you a sign-in code. Enter it to continue.".into(),
            MfaChallenge::CodeRequired => "Enter the code we emailed you.".into(),
            MfaChallenge::Expired => "That code has expired. Sign in again to get a new one.".into(),
            MfaChallenge::AttemptsExceeded => "Too many incorrect codes. Sign in again to get a new one.".into(),
            MfaChallenge::InvalidCode { attempts_left } => {
                format!("Invalid code. You have {} attempts left.", attempts_left)
            }
        }
    }
}

/// What to send to `/oauth2/token` for the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInAttempt {
    pub username: String,
    pub password: String,
    pub mfa_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignInFlow {
    pub email: String,
    pub password: String,
    pub code: String,
    step: SignInStep,
    error: Option<String>,
    pending: bool,
}

impl Default for SignInFlow {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            code: String::new(),
            step: SignInStep::Credentials,
            error: None,
            pending: false,
        }
    }
}

impl SignInFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignInStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Build the next request, or refuse with an inline message.
    pub fn begin(&mut self) -> Result<SignInAttempt, ValidationError> {
        let result = self.attempt();
        match &result {
            Ok(_) => {
                self.error = None;
                self.pending = true;
            }
            Err(e) => self.error = Some(e.message.clone()),
        }
        result
    }

    fn attempt(&self) -> Result<SignInAttempt, ValidationError> {
        if self.pending {
            return Err(ValidationError::new("form", "Signing in..."));
        }
        let username = self.email.trim();
        if username.is_empty() {
            return Err(ValidationError::new("email", "Enter your email address."));
        }
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "Enter your password."));
        }
        let mfa_code = match self.step {
            SignInStep::Otp => {
                let code = self.code.trim();
                if code.is_empty() {
                    return Err(ValidationError::new("code", MfaChallenge::CodeRequired.user_message()));
                }
                Some(code.to_string())
            }
            _ => None,
        };
        Ok(SignInAttempt {
            username: username.to_string(),
            password: self.password.clone(),
            mfa_code,
        })
    }

    /// Apply the token endpoint's answer and return the resulting step.
    pub fn finish(&mut self, result: Result<SessionIssued, ApiError>) -> SignInStep {
        self.pending = false;
        match result {
            Ok(issued) => {
                self.error = None;
                self.step = SignInStep::SignedIn {
                    onboarding_redirect: issued.onboarding_redirect,
                };
            }
            Err(e) => match MfaChallenge::parse(e.message()) {
                Some(challenge @ (MfaChallenge::Required | MfaChallenge::CodeRequired)) => {
                    self.step = SignInStep::Otp;
                    self.code.clear();
                    self.error = if challenge == MfaChallenge::Required {
                        None
                    } else {
                        Some(challenge.user_message())
                    };
                }
                Some(challenge @ MfaChallenge::InvalidCode { .. }) => {
                    self.step = SignInStep::Otp;
                    self.error = Some(challenge.user_message());
                }
                Some(challenge) => {
                    self.step = SignInStep::Credentials;
                    self.code.clear();
                    self.error = Some(challenge.user_message());
                }
                None => {
                    tracing::info!("sign-in refused: {}", e);
                    self.error = Some(e.user_message());
                }
            },
        }
        self.step
    }

    /// Leave the code step and start over.
    pub fn restart(&mut self) {
        self.step = SignInStep::Credentials;
        self.code.clear();
        self.error = None;
        self.pending = false;
    }

    /// Where to go once signed in.
    pub fn destination(&self) -> Option<&'static str> {
        match self.step {
            SignInStep::SignedIn { onboarding_redirect: true } => Some("/auth/finish"),
            SignInStep::SignedIn { onboarding_redirect: false } => Some("/dashboard"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::parse_envelope;
    use serde_json::json;

    fn filled() -> SignInFlow {
        SignInFlow {
            email: " albert@ufl.edu ".into(),
            password: "Aa1!aaaa".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mfa_required_moves_to_otp() {
        let mut flow = filled();
        let attempt = flow.begin().unwrap();
        assert_eq!(attempt.username, "albert@ufl.edu");
        assert_eq!(attempt.mfa_code, None);

        let err = parse_envelope(401, json!({"success": false, "error": "mfa_required"})).unwrap_err();
        assert_eq!(flow.finish(Err(err)), SignInStep::Otp);
        assert_eq!(flow.error(), None);
        assert_eq!(flow.destination(), None);

        flow.code = "123456".into();
        let attempt = flow.begin().unwrap();
        assert_eq!(attempt.mfa_code.as_deref(), Some("123456"));
    }

    #[test]
    fn test_invalid_code_stays_on_otp() {
        let mut flow = filled();
        flow.begin().unwrap();
        flow.finish(Err(ApiError::Backend("mfa_required".into())));
        flow.code = "000000".into();
        flow.begin().unwrap();
        let step = flow.finish(Err(ApiError::Backend(
            "Invalid mfa code. You have 2 attempts left.".into(),
        )));
        assert_eq!(step, SignInStep::Otp);
        assert_eq!(flow.error(), Some("Invalid code. You have 2 attempts left."));
    }

    #[test]
    fn test_expired_code_restarts() {
        let mut flow = filled();
        flow.begin().unwrap();
        flow.finish(Err(ApiError::Backend("mfa_required".into())));
        flow.code = "111111".into();
        flow.begin().unwrap();
        assert_eq!(
            flow.finish(Err(ApiError::Backend("mfa_expired".into()))),
            SignInStep::Credentials
        );
        assert!(flow.code.is_empty());
    }

    #[test]
    fn test_signed_in_destination() {
        let mut flow = filled();
        flow.begin().unwrap();
        flow.finish(Ok(SessionIssued {
            message: None,
            onboarding_redirect: true,
        }));
        assert_eq!(flow.destination(), Some("/auth/finish"));
    }

    #[test]
    fn test_wrong_password_stays_put() {
        let mut flow = filled();
        flow.begin().unwrap();
        let step = flow.finish(Err(ApiError::Backend("invalid credentials".into())));
        assert_eq!(step, SignInStep::Credentials);
        assert_eq!(flow.error(), Some("invalid credentials"));
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_begin_requires_fields() {
        let mut flow = SignInFlow::new();
        assert_eq!(flow.begin().unwrap_err().field, "email");
        assert_eq!(flow.error(), Some("Enter your email address."));
    }

    #[test]
    fn test_parse_challenges() {
        assert_eq!(MfaChallenge::parse("mfa_attempts_exceeded"), Some(MfaChallenge::AttemptsExceeded));
        assert_eq!(
            MfaChallenge::parse("Invalid mfa code. You have 0 attempts left."),
            Some(MfaChallenge::InvalidCode { attempts_left: 0 })
        );
        assert_eq!(MfaChallenge::parse("user not found"), None);
    }
}
