//! Account records and the request payloads used to authenticate.

use serde::{Deserialize, Serialize};

use retailinv_core::validate::{require_email, require_text};
use retailinv_core::{DomainError, DomainResult, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// Login payload. Ephemeral: owned by the login form, never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required before the form may submit.
    pub fn validate(&self) -> DomainResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("all fields are required"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registration
// ─────────────────────────────────────────────────────────────────────────────

/// Registration payload sent to `/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub role: Role,
}

impl RegistrationRequest {
    pub fn validate(&self) -> DomainResult<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        require_text("password", &self.password)?;
        require_text("phoneNumber", &self.phone_number)
    }
}

impl core::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User account
// ─────────────────────────────────────────────────────────────────────────────

/// A user account as managed from the admin user screen.
///
/// `password` is write-only: it is sent when creating/updating an account and
/// omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserAccount {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("firstName", &self.first_name)?;
        require_text("lastName", &self.last_name)?;
        require_email("email", &self.email)?;
        require_text("phoneNumber", &self.phone_number)
    }
}

impl From<&RegistrationRequest> for UserAccount {
    fn from(req: &RegistrationRequest) -> Self {
        Self {
            id: None,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            phone_number: req.phone_number.clone(),
            role: req.role,
            password: Some(req.password.clone()),
        }
    }
}
