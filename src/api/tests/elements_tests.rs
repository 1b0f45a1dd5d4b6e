//! Tests for auxiliary elements and their movements.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::api_with_mock;
use crate::models::{ElementEgress, ElementIngress, MovementKind, NewElement, Role};

#[tokio::test]
async fn elements_and_movements_decode() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri(), Role::User).await;

    Mock::given(method("GET"))
        .and(path("/api/elementos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "nombre": "Film",
            "descripcion": null,
            "cantidadTotal": 20,
            "cantidadDisponible": "4",
            "activo": true
        }])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/elementos/1/movimientos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "tipo": "egreso",
            "cantidad": 2,
            "motivo": { "id": 1, "nombre": "Uso" },
            "observaciones": null,
            "createdAt": "2024-03-01T10:00:00Z",
            "creadoPor": { "email": "ana@queseria.com" }
        }])))
        .mount(&mock_server)
        .await;

    let elements = api.elements().await.unwrap();
    assert_eq!(elements[0].available_quantity, 4);
    assert_eq!(elements[0].available_percent(), 20);

    let movements = api.element_movements(1).await.unwrap();
    assert_eq!(movements[0].kind, MovementKind::Egress);
    assert_eq!(
        movements[0].created_by.as_ref().and_then(|a| a.email.as_deref()),
        Some("ana@queseria.com")
    );
}

#[tokio::test]
async fn create_and_move_stock() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri(), Role::Admin).await;

    Mock::given(method("POST"))
        .and(path("/api/elementos"))
        .and(body_json(json!({ "nombre": "Bolsas", "cantidadTotal": 100, "descripcion": null })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2 })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/elementos/2/ingreso"))
        .and(body_json(json!({ "cantidad": 10, "observaciones": "Compra" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/elementos/2/egreso"))
        .and(body_json(json!({ "cantidad": 3, "motivoId": 4, "observaciones": null })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    api.create_element(&NewElement {
        name: "Bolsas".to_string(),
        total_quantity: 100,
        description: None,
    })
    .await
    .unwrap();
    api.element_ingress(
        2,
        &ElementIngress {
            quantity: 10,
            notes: Some("Compra".to_string()),
        },
    )
    .await
    .unwrap();
    api.element_egress(
        2,
        &ElementEgress {
            quantity: 3,
            reason_id: Some(4),
            notes: None,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn element_with_empty_name_is_rejected_locally() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri(), Role::Admin).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = api
        .create_element(&NewElement {
            name: "  ".to_string(),
            total_quantity: 5,
            description: None,
        })
        .await;
    assert!(result.is_err());
}
