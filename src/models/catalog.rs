use serde::{Deserialize, Serialize};

use super::lenient;

/// Cheese category ("tipo de queso")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Catalog entry. The PLU is the 5-digit key embedded in scale labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub plu: String,
    /// Sold per piece instead of per weight
    #[serde(rename = "seVendePorUnidad", default)]
    pub sold_by_unit: bool,
    #[serde(rename = "tipoQueso")]
    pub category: Category,
    #[serde(
        rename = "precio",
        default,
        deserialize_with = "lenient::opt_f64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(rename = "activo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Closed-vocabulary justification attached to intakes and cuts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    pub plu: String,
    #[serde(rename = "seVendePorUnidad")]
    pub sold_by_unit: bool,
    #[serde(rename = "tipoQuesoId")]
    pub category_id: u64,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            plu: product.plu.clone(),
            sold_by_unit: product.sold_by_unit,
            category_id: product.category.id,
            price: product.price,
        }
    }
}
