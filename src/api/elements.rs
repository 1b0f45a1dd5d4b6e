//! Auxiliary elements and their stock movements.

use reqwest::Method;

use super::InventoryApi;
use crate::elements::validate_new;
use crate::error::ApiResult;
use crate::models::{Element, ElementEgress, ElementIngress, ElementMovement, ElementUpdate, NewElement};

impl InventoryApi {
    pub async fn elements(&self) -> ApiResult<Vec<Element>> {
        self.get_json("/api/elementos", "elements").await
    }

    pub async fn element(&self, element_id: u64) -> ApiResult<Element> {
        self.get_json(&format!("/api/elementos/{element_id}"), "element")
            .await
    }

    /// Ingress and egress history of one element
    pub async fn element_movements(&self, element_id: u64) -> ApiResult<Vec<ElementMovement>> {
        self.get_json(
            &format!("/api/elementos/{element_id}/movimientos"),
            "element movements",
        )
        .await
    }

    pub async fn create_element(&self, element: &NewElement) -> ApiResult<()> {
        validate_new(element)?;
        self.execute(
            Method::POST,
            "/api/elementos",
            Some(element),
            "Failed to create element",
        )
        .await
    }

    pub async fn update_element(&self, element_id: u64, update: &ElementUpdate) -> ApiResult<()> {
        self.execute(
            Method::PUT,
            &format!("/api/elementos/{element_id}"),
            Some(update),
            "Failed to update element",
        )
        .await
    }

    pub async fn delete_element(&self, element_id: u64) -> ApiResult<()> {
        self.delete(
            &format!("/api/elementos/{element_id}"),
            "Failed to delete element",
        )
        .await
    }

    pub async fn element_ingress(&self, element_id: u64, ingress: &ElementIngress) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &format!("/api/elementos/{element_id}/ingreso"),
            Some(ingress),
            "Failed to register ingress",
        )
        .await
    }

    pub async fn element_egress(&self, element_id: u64, egress: &ElementEgress) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &format!("/api/elementos/{element_id}/egreso"),
            Some(egress),
            "Failed to register egress",
        )
        .await
    }
}
