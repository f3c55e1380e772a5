//! Session gate for protected screens.
//!
//! Every protected mount re-checks the session; nothing is cached between
//! mounts. The check fails closed: anything other than a verified session or
//! a successful refresh sends the visitor to sign-in.

use std::future::Future;

use crate::client::ApiClient;
use crate::endpoints::SessionStatus;
use crate::error::ApiError;

pub const SIGN_IN_PATH: &str = "/auth/signin";

/// The two backend calls the gate depends on.
pub trait AuthBackend {
    fn verify(&self) -> impl Future<Output = Result<SessionStatus, ApiError>>;
    fn refresh(&self) -> impl Future<Output = Result<(), ApiError>>;
}

impl AuthBackend for ApiClient {
    async fn verify(&self) -> Result<SessionStatus, ApiError> {
        self.verify_session().await
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        self.refresh_session().await.map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated,
    RedirectToSignIn,
}

pub struct SessionGate<B> {
    backend: B,
}

impl<B: AuthBackend> SessionGate<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Verify, then fall back to one refresh attempt. A verify call that
    /// errors out redirects straight away.
    pub async fn check(&self) -> GateOutcome {
        match self.backend.verify().await {
            Ok(SessionStatus::Verified) => GateOutcome::Authenticated,
            Ok(status) => {
                tracing::debug!("session {:?}, trying refresh", status);
                match self.backend.refresh().await {
                    Ok(()) => GateOutcome::Authenticated,
                    Err(e) => {
                        tracing::info!("refresh failed: {}", e);
                        GateOutcome::RedirectToSignIn
                    }
                }
            }
            Err(e) => {
                tracing::warn!("session verification failed: {}", e);
                GateOutcome::RedirectToSignIn
            }
        }
    }

    /// The finish-profile page only needs a signed-in session, complete or not.
    pub async fn check_signed_in(&self) -> GateOutcome {
        match self.backend.verify().await {
            Ok(SessionStatus::Verified | SessionStatus::Incomplete) => GateOutcome::Authenticated,
            Ok(SessionStatus::Rejected) => GateOutcome::RedirectToSignIn,
            Err(e) => {
                tracing::warn!("session verification failed: {}", e);
                GateOutcome::RedirectToSignIn
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBackend {
        verify: Result<SessionStatus, ApiError>,
        refresh: Result<(), ApiError>,
        refresh_calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(verify: Result<SessionStatus, ApiError>, refresh: Result<(), ApiError>) -> Self {
            Self {
                verify,
                refresh,
                refresh_calls: AtomicUsize::new(0),
            }
        }
    }

    impl AuthBackend for &MockBackend {
        async fn verify(&self) -> Result<SessionStatus, ApiError> {
            self.verify.clone()
        }

        async fn refresh(&self) -> Result<(), ApiError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.refresh.clone()
        }
    }

    fn expired() -> ApiError {
        ApiError::Unauthorized("refresh token expired".into())
    }

    #[tokio::test]
    async fn test_verified_session_skips_refresh() {
        let backend = MockBackend::new(Ok(SessionStatus::Verified), Err(expired()));
        assert_eq!(SessionGate::new(&backend).check().await, GateOutcome::Authenticated);
        assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_rescues_rejected_session() {
        let backend = MockBackend::new(Ok(SessionStatus::Rejected), Ok(()));
        assert_eq!(SessionGate::new(&backend).check().await, GateOutcome::Authenticated);
        assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_visitor_redirected() {
        let cases = [
            MockBackend::new(Ok(SessionStatus::Rejected), Err(expired())),
            MockBackend::new(Ok(SessionStatus::Incomplete), Err(expired())),
            MockBackend::new(Ok(SessionStatus::Rejected), Err(ApiError::Transport("offline".into()))),
            MockBackend::new(Err(ApiError::Transport("offline".into())), Ok(())),
            MockBackend::new(Err(ApiError::Decode("<html>".into())), Ok(())),
        ];
        for backend in &cases {
            assert_eq!(
                SessionGate::new(backend).check().await,
                GateOutcome::RedirectToSignIn
            );
        }
        // A verify that never answered does not try to refresh.
        assert_eq!(cases[3].refresh_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_incomplete_account_may_finish_profile() {
        let backend = MockBackend::new(Ok(SessionStatus::Incomplete), Err(expired()));
        assert_eq!(
            SessionGate::new(&backend).check_signed_in().await,
            GateOutcome::Authenticated
        );
        let backend = MockBackend::new(Ok(SessionStatus::Rejected), Ok(()));
        assert_eq!(
            SessionGate::new(&backend).check_signed_in().await,
            GateOutcome::RedirectToSignIn
        );
    }
}
