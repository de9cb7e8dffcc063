//! Route authorization guard.
//!
//! One evaluation runs per protected-navigation attempt:
//!
//! 1. no stored token → redirect to login (no network call);
//! 2. otherwise the token is confirmed with the server; a rejection or any
//!    failure clears the local session and redirects to login;
//! 3. a confirmed token is decoded and its role checked against the
//!    destination; a role mismatch redirects to the default landing page and
//!    keeps the session.
//!
//! Nothing is cached between evaluations.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use retailinv_auth::{Role, authorize, check_time_window, decode};

use crate::route::Route;
use crate::session::TokenValidator;
use crate::token_store::TokenStore;

/// Confirmations attempted when the stored token keeps changing underneath a
/// single evaluation (concurrent login/logout).
const MAX_CONFIRMATIONS: usize = 3;

/// Guard state for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "to", rename_all = "snake_case")]
pub enum GuardState {
    /// Evaluation in flight; show a loading indicator.
    Loading,
    /// Render the requested destination.
    Granted,
    /// Silently navigate elsewhere.
    Redirecting(Route),
}

/// Session status as seen by the client after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "role", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Validation in flight or not attempted yet.
    Unknown,
    /// Server-confirmed session; the role is from the (unverified) claims and
    /// may be absent.
    Authenticated(Option<Role>),
    Unauthenticated,
}

/// Result of one guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub state: GuardState,
    pub session: SessionStatus,
}

impl Decision {
    fn to_login() -> Self {
        Self {
            state: GuardState::Redirecting(Route::Login),
            session: SessionStatus::Unauthenticated,
        }
    }
}

pub struct AuthorizationGuard {
    store: Arc<dyn TokenStore>,
    validator: Arc<dyn TokenValidator>,
}

impl AuthorizationGuard {
    pub fn new(store: Arc<dyn TokenStore>, validator: Arc<dyn TokenValidator>) -> Self {
        Self { store, validator }
    }

    /// Run a full evaluation for `destination`.
    ///
    /// Always ends in `Granted` or `Redirecting`; fails closed.
    pub async fn evaluate(&self, destination: Route) -> Decision {
        let mut last_seen = self.store.read();

        for _ in 0..MAX_CONFIRMATIONS {
            let Some(token) = last_seen.take() else {
                tracing::debug!(route = %destination, "no session; redirecting to login");
                return Decision::to_login();
            };

            match self.validator.confirm_token().await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!(route = %destination, "session rejected; redirecting to login");
                    self.store.clear_if_current(&token);
                    return Decision::to_login();
                }
                Err(err) => {
                    tracing::warn!(route = %destination, "session check failed ({err}); redirecting to login");
                    self.store.clear_if_current(&token);
                    return Decision::to_login();
                }
            }

            // Re-read: another attempt may have cleared or replaced the token
            // while this one was waiting on the server.
            match self.store.read() {
                None => {
                    tracing::debug!(route = %destination, "session cleared during validation");
                    return Decision::to_login();
                }
                Some(current) if current != token => {
                    tracing::debug!(route = %destination, "session replaced during validation; re-checking");
                    last_seen = Some(current);
                }
                Some(_) => return self.decide(destination, &token),
            }
        }

        tracing::warn!(route = %destination, "session kept changing during validation; redirecting to login");
        if let Some(unconfirmed) = last_seen {
            self.store.clear_if_current(&unconfirmed);
        }
        Decision::to_login()
    }

    fn decide(&self, destination: Route, token: &str) -> Decision {
        let role = decode(token).role;
        let session = SessionStatus::Authenticated(role);

        match authorize(role, destination.access()) {
            Ok(()) => Decision {
                state: GuardState::Granted,
                session,
            },
            Err(err) => {
                tracing::info!(route = %destination, "access denied ({err}); redirecting to landing page");
                Decision {
                    state: GuardState::Redirecting(Route::Dashboard),
                    session,
                }
            }
        }
    }

    /// Role from the stored token *before* any server confirmation.
    ///
    /// UI hint only (e.g. which shell to render while `Loading`). `None` when
    /// there is no token, no role, or the token is visibly expired.
    pub fn optimistic_role(&self) -> Option<Role> {
        let claims = decode(&self.store.read()?);
        check_time_window(&claims, Utc::now()).ok()?;
        claims.role
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::SessionResult;
    use crate::session::TokenValidator;

    /// Validator answering from a script; panics if called more than scripted.
    pub struct ScriptedValidator {
        answers: Mutex<VecDeque<SessionResult<bool>>>,
        calls: AtomicUsize,
        before_answer: Option<Box<dyn Fn() + Send + Sync>>,
    }

    impl ScriptedValidator {
        pub fn new(answers: impl IntoIterator<Item = SessionResult<bool>>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                calls: AtomicUsize::new(0),
                before_answer: None,
            }
        }

        pub fn with_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
            self.before_answer = Some(Box::new(hook));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenValidator for ScriptedValidator {
        async fn confirm_token(&self) -> SessionResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(hook) = &self.before_answer {
                hook();
            }
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .expect("validator called more times than scripted")
        }
    }

    /// Signed test token; the guard never checks the signature.
    pub fn mint_token(role: Option<&str>, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let mut claims = json!({
            "sub": "a@x.com",
            "iat": now - 10,
            "exp": now + exp_offset_secs,
        });
        if let Some(role) = role {
            claims["role"] = json!(role);
        }
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }
}
