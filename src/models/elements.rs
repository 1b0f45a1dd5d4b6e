use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Reason};

/// Non-cheese consumable counted in discrete units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "cantidadTotal", deserialize_with = "lenient::count")]
    pub total_quantity: u64,
    #[serde(rename = "cantidadDisponible", deserialize_with = "lenient::count")]
    pub available_quantity: u64,
    #[serde(rename = "activo", default)]
    pub active: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Element {
    /// Share of the historic total still available, rounded to whole percent
    pub fn available_percent(&self) -> u64 {
        if self.total_quantity == 0 {
            return 0;
        }
        let ratio = self.available_quantity as f64 / self.total_quantity as f64;
        (ratio * 100.0).round() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "ingreso")]
    Ingress,
    #[serde(rename = "egreso")]
    Egress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementAuthor {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMovement {
    pub id: u64,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "cantidad", deserialize_with = "lenient::count")]
    pub quantity: u64,
    #[serde(rename = "motivo", default)]
    pub reason: Option<Reason>,
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "creadoPor", default)]
    pub created_by: Option<MovementAuthor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewElement {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidadTotal")]
    pub total_quantity: u64,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementIngress {
    #[serde(rename = "cantidad")]
    pub quantity: u64,
    #[serde(rename = "observaciones")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementEgress {
    #[serde(rename = "cantidad")]
    pub quantity: u64,
    #[serde(rename = "motivoId")]
    pub reason_id: Option<u64>,
    #[serde(rename = "observaciones")]
    pub notes: Option<String>,
}
