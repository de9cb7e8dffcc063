//! Wire types specific to the authentication endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use retailinv_auth::{Claims, Role};

/// Successful `/auth/login` response.
///
/// The auth service may omit `role` (it is always present inside the token),
/// so [`LoginResponse::role`] falls back to the decoded claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Unverified claims carried by the issued token.
    pub fn claims(&self) -> Claims {
        retailinv_auth::decode(&self.token)
    }

    /// Role reported by the server, or else the one in the token.
    pub fn role(&self) -> Option<Role> {
        self.role.or_else(|| self.claims().role)
    }
}

/// An unknown role string is reported as "no role" instead of failing the
/// whole response.
fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse::<Role>().ok()))
}
