use reqwest::Method;

use retailinv_core::{Store, StoreId};

use super::ApiClient;
use crate::error::SessionResult;

impl ApiClient {
    fn stores_url(&self) -> String {
        format!("{}/stores", self.config.stores_url)
    }

    pub async fn list_stores(&self) -> SessionResult<Vec<Store>> {
        self.get_json(self.stores_url(), "list stores").await
    }

    pub async fn create_store(&self, store: &Store) -> SessionResult<Store> {
        store.validate()?;
        let created: Store = self
            .send_json(Method::POST, self.stores_url(), store, "create store")
            .await?;
        tracing::info!(store_id = ?created.id, name = %created.name, "store created");
        Ok(created)
    }

    pub async fn update_store(&self, id: StoreId, store: &Store) -> SessionResult<Store> {
        store.validate()?;
        let url = format!("{}/{}", self.stores_url(), id);
        self.send_json(Method::PUT, url, store, "update store").await
    }

    pub async fn delete_store(&self, id: StoreId) -> SessionResult<()> {
        self.delete(format!("{}/{}", self.stores_url(), id), "delete store")
            .await?;
        tracing::info!(store_id = %id, "store deleted");
        Ok(())
    }
}
