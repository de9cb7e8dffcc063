use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Claims decoded from a bearer token's payload segment.
///
/// Every field is optional: a token that decodes to nothing useful yields
/// `Claims::default()`, which carries no role and is therefore never admin.
/// These claims are **unverified** and must only drive UI hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the account email for tokens issued by the auth service).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Issued-at, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration, seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(|r| r.is_admin())
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|s| DateTime::from_timestamp(s, 0))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|s| DateTime::from_timestamp(s, 0))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Advisory check of the claims' time window.
///
/// Missing timestamps are not an error here: the server decides validity.
/// This only lets the client skip an optimistic hint for a token that is
/// obviously stale.
pub fn check_time_window(claims: &Claims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let issued_at = claims.issued_at();
    let expires_at = claims.expires_at();

    if let (Some(iat), Some(exp)) = (issued_at, expires_at) {
        if exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
    }
    if issued_at.is_some_and(|iat| now < iat) {
        return Err(TokenValidationError::NotYetValid);
    }
    if expires_at.is_some_and(|exp| now >= exp) {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
