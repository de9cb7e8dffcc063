//! Inventory levels and stock movements.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{InventoryId, MovementId, ProductId, StoreId, UserId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    /// Stock received into a store.
    Entry,
    /// Stock leaving a store.
    Exit,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entry => "ENTRY",
            MovementType::Exit => "EXIT",
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(MovementType::Entry),
            "EXIT" => Ok(MovementType::Exit),
            other => Err(DomainError::validation(format!(
                "movement type must be ENTRY or EXIT, got '{other}'"
            ))),
        }
    }
}

/// Quantity of one product held by one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<InventoryId>,
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A recorded stock movement (audit trail, admin-only view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovementId>,
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub quantity: i64,
    pub movement_type: MovementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_date: Option<NaiveDateTime>,
}

/// Movement counts grouped by movement type.
///
/// Keys are kept as the raw strings the service reports so that an
/// unexpected type does not make the whole response unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementMetrics(BTreeMap<String, u64>);

impl MovementMetrics {
    pub fn count(&self, movement_type: MovementType) -> u64 {
        self.0.get(movement_type.as_str()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// A stock update submitted from the inventory screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub user_id: UserId,
    pub movement_type: MovementType,
}

impl StockUpdate {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        Ok(())
    }
}
