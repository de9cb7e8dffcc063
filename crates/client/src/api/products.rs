use reqwest::Method;

use retailinv_core::{Product, ProductId};

use super::ApiClient;
use crate::error::SessionResult;

impl ApiClient {
    fn products_url(&self) -> String {
        format!("{}/products", self.config.products_url)
    }

    pub async fn list_products(&self) -> SessionResult<Vec<Product>> {
        self.get_json(self.products_url(), "list products").await
    }

    pub async fn create_product(&self, product: &Product) -> SessionResult<Product> {
        product.validate()?;
        self.send_json(Method::POST, self.products_url(), product, "create product")
            .await
    }

    pub async fn update_product(&self, id: ProductId, product: &Product) -> SessionResult<Product> {
        product.validate()?;
        let url = format!("{}/{}", self.products_url(), id);
        self.send_json(Method::PUT, url, product, "update product").await
    }

    pub async fn delete_product(&self, id: ProductId) -> SessionResult<()> {
        self.delete(format!("{}/{}", self.products_url(), id), "delete product")
            .await
    }
}
