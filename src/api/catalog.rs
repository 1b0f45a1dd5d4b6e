//! Products, cheese categories and reasons.

use reqwest::Method;

use super::InventoryApi;
use crate::error::ApiResult;
use crate::forms::validate_product;
use crate::models::{Category, NewProduct, Product, Reason};

impl InventoryApi {
    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.get_json("/api/productos", "products").await
    }

    pub async fn create_product(&self, product: &NewProduct) -> ApiResult<()> {
        validate_product(product)?;
        self.execute(
            Method::POST,
            "/api/productos",
            Some(product),
            "Failed to create product",
        )
        .await
    }

    pub async fn update_product(&self, product_id: u64, product: &NewProduct) -> ApiResult<()> {
        validate_product(product)?;
        self.execute(
            Method::PUT,
            &format!("/api/productos/{product_id}"),
            Some(product),
            "Failed to update product",
        )
        .await
    }

    pub async fn delete_product(&self, product_id: u64) -> ApiResult<()> {
        self.delete(
            &format!("/api/productos/{product_id}"),
            "Failed to delete product",
        )
        .await
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        self.get_json("/api/tipos-queso", "categories").await
    }

    pub async fn reasons(&self) -> ApiResult<Vec<Reason>> {
        self.get_json("/api/motivos", "reasons").await
    }
}
