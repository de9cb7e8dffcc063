use reqwest::Method;

use retailinv_core::{InventoryLevel, InventoryMovement, MovementMetrics, StockUpdate, StoreId};

use super::ApiClient;
use crate::error::SessionResult;

impl ApiClient {
    fn inventory_url(&self, path: &str) -> String {
        format!("{}/inventory{}", self.config.inventory_url, path)
    }

    /// Stock levels of every product in one store.
    pub async fn inventory_for_store(&self, store_id: StoreId) -> SessionResult<Vec<InventoryLevel>> {
        self.get_json(self.inventory_url(&format!("/{store_id}")), "inventory for store")
            .await
    }

    /// Record a stock movement; the service answers with the resulting level.
    pub async fn update_stock(&self, update: &StockUpdate) -> SessionResult<InventoryLevel> {
        update.validate()?;

        let url = self.inventory_url(&format!("/{}/{}", update.store_id, update.product_id));
        let req = self.authorized(Method::PUT, url)?.query(&[
            ("quantity", update.quantity.to_string()),
            ("userId", update.user_id.to_string()),
            ("movementType", update.movement_type.to_string()),
        ]);
        let resp = self.send(req, "update stock").await?;
        let level: InventoryLevel = crate::http::parse_json(resp, "update stock").await?;

        tracing::info!(
            store_id = %update.store_id,
            product_id = %update.product_id,
            movement = %update.movement_type,
            quantity = update.quantity,
            "stock updated"
        );
        Ok(level)
    }

    pub async fn list_movements(&self) -> SessionResult<Vec<InventoryMovement>> {
        self.get_json(self.inventory_url("/movements"), "list movements")
            .await
    }

    pub async fn movements_by_store(&self, store_id: StoreId) -> SessionResult<Vec<InventoryMovement>> {
        self.get_json(
            self.inventory_url(&format!("/movements/{store_id}")),
            "movements by store",
        )
        .await
    }

    pub async fn movement_metrics(&self) -> SessionResult<MovementMetrics> {
        self.get_json(self.inventory_url("/movements/metrics"), "movement metrics")
            .await
    }
}
