//! Navigation layer: runs the guard for each attempt and applies only the
//! result of the latest one.
//!
//! Attempts may overlap (rapid navigation). Each takes a ticket; when its
//! evaluation settles, the decision is applied only if no newer attempt has
//! started in the meantime. Stale results are discarded, never applied to a
//! destination the user has already left.

use std::sync::Mutex;

use retailinv_auth::Role;

use crate::guard::{AuthorizationGuard, Decision, GuardState, SessionStatus};
use crate::route::Route;

#[derive(Debug)]
struct NavState {
    /// Ticket of the most recent attempt.
    latest: u64,
    destination: Option<Route>,
    state: GuardState,
    session: SessionStatus,
}

/// Outcome of a navigation attempt that was still current when it settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub decision: Decision,
}

impl Navigation {
    /// The route that ends up rendered.
    pub fn target(&self) -> Route {
        match self.decision.state {
            GuardState::Redirecting(route) => route,
            GuardState::Granted | GuardState::Loading => self.requested,
        }
    }
}

pub struct Navigator {
    guard: AuthorizationGuard,
    inner: Mutex<NavState>,
}

impl Navigator {
    pub fn new(guard: AuthorizationGuard) -> Self {
        Self {
            guard,
            inner: Mutex::new(NavState {
                latest: 0,
                destination: None,
                state: GuardState::Loading,
                session: SessionStatus::Unknown,
            }),
        }
    }

    pub fn guard(&self) -> &AuthorizationGuard {
        &self.guard
    }

    /// Navigate to `destination`.
    ///
    /// Public destinations are granted without consulting the guard. Returns
    /// `None` when a newer navigation superseded this one before it settled.
    pub async fn navigate(&self, destination: Route) -> Option<Navigation> {
        if !destination.access().is_protected() {
            let mut inner = self.lock();
            inner.latest += 1;
            inner.destination = Some(destination);
            inner.state = GuardState::Granted;
            return Some(Navigation {
                requested: destination,
                decision: Decision {
                    state: GuardState::Granted,
                    session: inner.session,
                },
            });
        }

        let ticket = self.begin(destination);
        let decision = self.guard.evaluate(destination).await;
        self.settle(ticket, destination, decision)
    }

    fn begin(&self, destination: Route) -> u64 {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.destination = Some(destination);
        inner.state = GuardState::Loading;
        inner.session = SessionStatus::Unknown;
        inner.latest
    }

    fn settle(&self, ticket: u64, destination: Route, decision: Decision) -> Option<Navigation> {
        let mut inner = self.lock();
        if inner.latest != ticket {
            tracing::debug!(route = %destination, "discarding result of superseded navigation");
            return None;
        }

        inner.state = decision.state;
        inner.session = decision.session;
        if let GuardState::Redirecting(to) = decision.state {
            inner.destination = Some(to);
        }

        Some(Navigation {
            requested: destination,
            decision,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NavState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current guard state (`Loading` while an evaluation is in flight).
    pub fn state(&self) -> GuardState {
        self.lock().state
    }

    pub fn status(&self) -> SessionStatus {
        self.lock().session
    }

    /// Destination currently shown (or being evaluated).
    pub fn location(&self) -> Option<Route> {
        self.lock().destination
    }

    /// Role to pick a shell with while `Loading`; never an authorization input.
    pub fn shell_hint(&self) -> Option<Role> {
        match self.status() {
            SessionStatus::Authenticated(role) => role,
            SessionStatus::Unknown => self.guard.optimistic_role(),
            SessionStatus::Unauthenticated => None,
        }
    }
}
