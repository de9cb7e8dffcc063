use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role carried by a token and by user accounts.
///
/// The backend knows exactly two roles; anything else is rejected at parse
/// time rather than compared as a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Employee,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Case-insensitive; a Spring-style `ROLE_` prefix is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match name {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYEE" => Ok(Role::Employee),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_known_roles_leniently() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("employee".parse::<Role>(), Ok(Role::Employee));
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" role_employee ".parse::<Role>(), Ok(Role::Employee));
    }

    #[test]
    fn rejects_unknown_roles() {
        assert_eq!(
            "MANAGER".parse::<Role>(),
            Err(ParseRoleError("MANAGER".to_string()))
        );
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn wire_format_is_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::Employee.to_string(), "EMPLOYEE");
    }

    proptest! {
        /// Property: only the two known role names (modulo case/prefix) parse.
        #[test]
        fn only_known_names_parse(s in "\\PC{0,24}") {
            let normalized = s.trim().to_ascii_uppercase();
            let name = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
            let known = name == "ADMIN" || name == "EMPLOYEE";
            prop_assert_eq!(s.parse::<Role>().is_ok(), known);
        }
    }
}
