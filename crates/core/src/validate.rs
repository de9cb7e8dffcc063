//! Field-level checks shared by the record `validate()` methods.

use crate::error::{DomainError, DomainResult};

/// Require a non-blank text field.
pub fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Require a plausible email address: exactly one `@`, with something on
/// both sides and a dot somewhere in the domain part.
pub fn require_email(field: &str, value: &str) -> DomainResult<()> {
    require_text(field, value)?;

    let value = value.trim();
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DomainError::validation(format!("{field} must be a valid email address")));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(DomainError::validation(format!("{field} must be a valid email address")));
    }
    Ok(())
}
