//! `retailinv-core`: domain records shared by the admin client.
//!
//! This crate contains **pure domain** types (no IO, no HTTP): identifiers,
//! the records exchanged with the store/product/inventory services, and the
//! form-level validation applied before anything is submitted.

pub mod error;
pub mod id;
pub mod inventory;
pub mod product;
pub mod store;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use id::{InventoryId, MovementId, ProductId, StoreId, UserId};
pub use inventory::{InventoryLevel, InventoryMovement, MovementMetrics, MovementType, StockUpdate};
pub use product::Product;
pub use store::Store;
