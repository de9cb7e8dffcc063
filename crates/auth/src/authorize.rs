//! Role-based access decisions for client-side destinations.
//!
//! - No IO
//! - No panics
//! - Pure policy check; whether the session is *valid* is decided elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Access level required by a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Reachable without a session (login, registration).
    Public,
    /// Any confirmed session.
    Authenticated,
    /// Confirmed session whose role is `ADMIN`.
    AdminOnly,
}

impl Access {
    pub fn is_protected(&self) -> bool {
        !matches!(self, Access::Public)
    }
}

/// Denial for a confirmed session. Unconfirmed sessions never reach this check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: {required:?} access is not granted to role {role}")]
    Forbidden { required: Access, role: RoleLabel },
}

/// Display helper so a missing role renders as `none` in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLabel(pub Option<Role>);

impl core::fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(role) => core::fmt::Display::fmt(&role, f),
            None => f.write_str("none"),
        }
    }
}

/// Decide whether an authenticated session with `role` may enter a
/// destination requiring `required`.
///
/// The caller must have confirmed the session with the server first; `role`
/// comes from decoded claims and may be absent. An absent role is never
/// treated as admin.
pub fn authorize(role: Option<Role>, required: Access) -> Result<(), AuthzError> {
    match required {
        Access::Public | Access::Authenticated => Ok(()),
        Access::AdminOnly => match role {
            Some(Role::Admin) => Ok(()),
            Some(Role::Employee) | None => Err(AuthzError::Forbidden {
                required,
                role: RoleLabel(role),
            }),
        },
    }
}
