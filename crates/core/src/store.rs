//! Store records (managed by administrators).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;
use crate::id::StoreId;
use crate::validate::require_text;

/// A physical store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StoreId>,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Store {
    /// A new, unsaved store (the server assigns id and timestamps).
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: address.into(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_shape() {
        let store: Store = serde_json::from_str(
            r#"{"id":3,"name":"Centro","address":"Calle 1","createdAt":"2025-02-01T10:00:00","updatedAt":null}"#,
        )
        .unwrap();
        assert_eq!(store.id, Some(StoreId::new(3)));
        assert!(store.created_at.is_some());
        assert!(store.updated_at.is_none());
    }

    #[test]
    fn new_store_omits_server_fields() {
        let json = serde_json::to_value(Store::new("Norte", "Av. 2")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Norte", "address": "Av. 2"}));
    }

    #[test]
    fn address_is_required() {
        assert!(Store::new("Norte", " ").validate().is_err());
        assert!(Store::new("Norte", "Av. 2").validate().is_ok());
    }
}
