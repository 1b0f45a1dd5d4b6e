//! End-to-end flow against a mock backend: log in, scan a label, register
//! the unit, then cut it down by scanning the remaining piece.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cheese_inventory::barcode::decode;
use cheese_inventory::history::{summarize, top_sellers};
use cheese_inventory::inventory::{plan_cut_from_label, plan_full_egress, plan_intake};
use cheese_inventory::{ApiError, Capabilities, InventoryApi, ValidationError};

fn provolone() -> serde_json::Value {
    json!({
        "id": 1,
        "nombre": "Provolone",
        "plu": "20001",
        "seVendePorUnidad": false,
        "tipoQueso": { "id": 3, "nombre": "Hilado" },
        "precio": "1500.00"
    })
}

fn unit(id: u64, initial: u32, current: u32, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "producto": provolone(),
        "pesoInicial": initial,
        "pesoActual": current,
        "activa": active,
        "particiones": [],
        "createdAt": "2024-03-01T10:00:00Z",
        "updatedAt": "2024-03-02T18:00:00Z",
        "observacionesIngreso": "Lote 42"
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "flow-token",
            "rol": "admin"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(header("Authorization", "Bearer flow-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([provolone()])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn scan_intake_and_cut() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .and(body_json(json!({
            "productoId": 1,
            "pesoInicial": 1000,
            "observacionesIngreso": "Lote 42",
            "motivoId": 2
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(unit(10, 1000, 1000, true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([unit(10, 1000, 1000, true)])))
        .mount(&server)
        .await;
    // Remaining piece weighs 650g, so 350g were cut
    Mock::given(method("POST"))
        .and(path("/api/unidades/10/particiones"))
        .and(body_json(json!({
            "peso": 350,
            "observacionesCorte": "Cut without notes",
            "motivoId": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let api = InventoryApi::with_base_url(server.uri());
    let session = api.login("ana", "secret").await.unwrap();
    let caps = Capabilities::for_session(Some(&session));
    assert!(caps.can_create && caps.can_cut);

    let catalog = api.products().await.unwrap();
    let scanned = decode("2020001010004", &catalog).unwrap();
    assert_eq!(scanned.product.name, "Provolone");
    assert_eq!(scanned.grams, 1000);

    let intake = plan_intake("2020001010004", &catalog, Some(2), Some("Lote 42")).unwrap();
    api.create_unit(&intake).await.unwrap();

    let units = api.units().await.unwrap();
    let cut = plan_cut_from_label(&units[0], "2020001006507", &catalog, None, Some(1)).unwrap();
    assert_eq!(cut.grams, 350);
    api.create_cut(units[0].id, &cut).await.unwrap();
}

#[tokio::test]
async fn unknown_label_never_reaches_backend() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let api = InventoryApi::with_base_url(server.uri());
    api.login("ana", "secret").await.unwrap();
    let catalog = api.products().await.unwrap();

    let err = plan_intake("0099999005001", &catalog, Some(1), None).unwrap_err();
    assert_eq!(err.to_string(), "No product found with PLU: 99999");

    let err = plan_intake("0020001005001", &catalog, None, None).unwrap_err();
    assert_eq!(err, ValidationError::Missing("Intake reason"));
}

#[tokio::test]
async fn expired_token_during_history_review() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/unidades/historial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            unit(1, 1000, 0, false),
            unit(2, 2000, 1500, true)
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/unidades/historial"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = InventoryApi::with_base_url(server.uri());
    api.login("ana", "secret").await.unwrap();

    let history = api.history().await.unwrap();
    let stats = summarize(&history);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.sold_grams, 1000);
    assert_eq!(stats.dispensed_grams, 1500);
    assert_eq!(top_sellers(&history)[0].dispensed_grams, 1000);
    assert!(plan_full_egress(&history[0], None).is_err());

    let err = api.history().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(api.capabilities().await, Capabilities::NONE);
}
