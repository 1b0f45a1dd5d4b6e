//! Decoding tests for the wire schemas.

use serde_json::json;

use super::*;

#[test]
fn stock_unit_with_cuts_and_string_weights() {
    let unit: StockUnit = serde_json::from_value(json!({
        "id": 12,
        "producto": {
            "id": 1,
            "nombre": "Provolone",
            "plu": "20001",
            "tipoQueso": { "id": 3, "nombre": "Hilado" }
        },
        "pesoInicial": "1500",
        "pesoActual": 900.0,
        "activa": true,
        "particiones": [
            { "id": 1, "peso": "600", "createdAt": "2024-03-02T12:00:00Z", "observacionesCorte": "Venta" }
        ],
        "createdAt": "2024-03-01T10:00:00.000Z",
        "fechaEgreso": null,
        "observacionesIngreso": "Lote 7",
        "motivo": { "id": 1, "nombre": "Compra" }
    }))
    .unwrap();

    assert_eq!(unit.initial_grams, 1500);
    assert_eq!(unit.current_grams, 900);
    assert_eq!(unit.dispensed_grams(), 600);
    assert_eq!(unit.cuts[0].grams, 600);
    assert_eq!(unit.cuts[0].note.as_deref(), Some("Venta"));
    assert!(!unit.product.sold_by_unit);
    assert_eq!(unit.product.price, None);
    assert_eq!(unit.updated_at, None);
    assert_eq!(unit.reason.map(|r| r.name), Some("Compra".to_string()));
}

#[test]
fn fractional_or_negative_grams_are_rejected() {
    let base = json!({
        "id": 1,
        "producto": { "id": 1, "nombre": "Sardo", "plu": "20002", "tipoQueso": { "id": 1, "nombre": "Duro" } },
        "pesoInicial": 100,
        "pesoActual": 50,
        "activa": true,
        "createdAt": "2024-03-01T10:00:00Z"
    });

    let mut fractional = base.clone();
    fractional["pesoActual"] = json!(50.5);
    assert!(serde_json::from_value::<StockUnit>(fractional).is_err());

    let mut negative = base.clone();
    negative["pesoActual"] = json!("-1");
    assert!(serde_json::from_value::<StockUnit>(negative).is_err());

    let unit: StockUnit = serde_json::from_value(base).unwrap();
    assert!(unit.cuts.is_empty());
}

#[test]
fn fecha_egreso_is_read_as_updated_at() {
    let unit: StockUnit = serde_json::from_value(json!({
        "id": 1,
        "producto": { "id": 1, "nombre": "Sardo", "plu": "20002", "tipoQueso": { "id": 1, "nombre": "Duro" } },
        "pesoInicial": 100,
        "pesoActual": 0,
        "activa": false,
        "createdAt": "2024-03-01T10:00:00Z",
        "fechaEgreso": "2024-03-05T09:30:00Z"
    }))
    .unwrap();
    assert_eq!(
        unit.updated_at.map(|d| d.to_rfc3339()),
        Some("2024-03-05T09:30:00+00:00".to_string())
    );
}

#[test]
fn roles_on_the_wire() {
    let login: LoginResponse = serde_json::from_value(json!({ "token": "t", "rol": "usuario" })).unwrap();
    assert_eq!(login.role, Role::User);
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("admin"));
    assert!(serde_json::from_value::<Role>(json!("superuser")).is_err());
}

#[test]
fn intake_payload_field_names() {
    let body = serde_json::to_value(NewUnit {
        product_id: 4,
        initial_grams: 500,
        intake_note: None,
        reason_id: Some(2),
    })
    .unwrap();
    assert_eq!(
        body,
        json!({ "productoId": 4, "pesoInicial": 500, "observacionesIngreso": null, "motivoId": 2 })
    );
}

#[test]
fn product_payload_omits_missing_price() {
    let body = serde_json::to_value(NewProduct {
        name: "Brie".to_string(),
        plu: "30001".to_string(),
        sold_by_unit: true,
        category_id: 5,
        price: None,
    })
    .unwrap();
    assert_eq!(
        body,
        json!({ "nombre": "Brie", "plu": "30001", "seVendePorUnidad": true, "tipoQuesoId": 5 })
    );
}

#[test]
fn dashboard_accepts_partial_and_aliased_fields() {
    let report: DashboardReport = serde_json::from_value(json!({
        "inventarioActual": [{ "tipoQueso": "Blando", "cantidad": 2, "pesoActual": 800 }],
        "ventas": { "mes": [{ "fecha": "2024-03-01", "peso": "300.5", "cortes": 1 }] },
        "inventarioValorizado": [{ "tipoQueso": "Blando", "valorTotal": "12000.00" }]
    }))
    .unwrap();

    assert_eq!(report.current_inventory[0].total_grams, 800.0);
    assert_eq!(report.sales.month[0].total_grams, 300.5);
    assert!(report.sales.today.is_empty());
    assert!(report.top_products.is_empty());
    assert_eq!(report.valued_inventory[0].total_value, 12000.0);
    assert_eq!(report.valued_inventory[0].label.as_deref(), Some("Blando"));
}

#[test]
fn dashboard_counts_as_strings_and_null_weights() {
    let report: DashboardReport = serde_json::from_value(json!({
        "inventarioActual": [
            { "tipoQueso": "Hilado", "cantidad": "3", "pesoTotal": "4500.00" },
            { "tipoQueso": "Duro", "cantidad": 2, "pesoTotal": null }
        ],
        "topProductos": [
            { "nombre": "Sardo", "totalVendido": null, "cantidadCortes": null, "promedioCorte": null }
        ]
    }))
    .unwrap();

    assert_eq!(report.current_inventory[0].units, 3);
    assert_eq!(report.current_inventory[0].total_grams, 4500.0);
    assert_eq!(report.current_inventory[1].units, 2);
    assert_eq!(report.current_inventory[1].total_grams, 0.0);
    assert_eq!(report.top_products[0].dispensed_grams, 0.0);
    assert_eq!(report.top_products[0].cuts, 0);
}

#[test]
fn fractional_count_is_a_decode_error() {
    let result = serde_json::from_value::<InventoryRow>(json!({ "cantidad": "2.5" }));
    assert!(result.is_err());
}

#[test]
fn non_numeric_string_is_a_decode_error() {
    let result = serde_json::from_value::<TopProduct>(json!({ "nombre": "Sardo", "totalVendido": "mucho" }));
    assert!(result.is_err());
}

#[test]
fn alert_details_are_kept() {
    let alert: Alert = serde_json::from_value(json!({
        "tipo": "stock_bajo",
        "mensaje": "Quedan 200g",
        "detalles": { "unidadId": 4, "peso": 200 }
    }))
    .unwrap();
    assert_eq!(alert.priority_or_default(), "baja");
    assert_eq!(alert.details.unwrap()["unidadId"], json!(4));
}
