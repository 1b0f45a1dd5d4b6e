//! Tests for the inventory API client, run against wiremock servers.

mod elements_tests;

use serde_json::{json, Value};

use crate::api::InventoryApi;
use crate::models::Role;
use crate::session::Session;

pub(super) const TOKEN: &str = "test_token";

/// Client pointed at the mock server, already logged in as `role`
pub(super) async fn api_with_mock(mock_uri: &str, role: Role) -> InventoryApi {
    let api = InventoryApi::with_base_url(mock_uri);
    api.set_session(Some(Session {
        token: TOKEN.to_string(),
        role,
    }))
    .await;
    api
}

pub(super) fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

pub(super) fn product_json(id: u64, name: &str, plu: &str) -> Value {
    json!({
        "id": id,
        "nombre": name,
        "plu": plu,
        "seVendePorUnidad": false,
        "tipoQueso": { "id": 1, "nombre": "Semiduro" },
        "precio": "1500.00"
    })
}

pub(super) fn unit_json(id: u64, initial: u32, current: u32, active: bool) -> Value {
    json!({
        "id": id,
        "producto": product_json(1, "Provolone", "20001"),
        "pesoInicial": initial,
        "pesoActual": current,
        "activa": active,
        "particiones": [],
        "createdAt": "2024-03-01T10:00:00.000Z",
        "observacionesIngreso": null
    })
}
