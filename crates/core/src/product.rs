//! Product catalog records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{ProductId, StoreId};
use crate::validate::require_text;

/// A product sold in a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub store_id: StoreId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        store_id: StoreId,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            category: category.into(),
            store_id,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("price must be a non-negative amount"));
        }
        Ok(())
    }
}
