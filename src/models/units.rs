use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Product, Reason};

/// Recorded reduction of a unit's remaining weight. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub id: u64,
    #[serde(rename = "peso", deserialize_with = "lenient::grams")]
    pub grams: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "observacionesCorte", default)]
    pub note: Option<String>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<Reason>,
}

/// One trackable piece of cheese stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUnit {
    pub id: u64,
    #[serde(rename = "producto")]
    pub product: Product,
    #[serde(rename = "pesoInicial", deserialize_with = "lenient::grams")]
    pub initial_grams: u32,
    #[serde(rename = "pesoActual", deserialize_with = "lenient::grams")]
    pub current_grams: u32,
    /// Set by the backend; never recomputed from the weights
    #[serde(rename = "activa")]
    pub active: bool,
    #[serde(rename = "particiones", default)]
    pub cuts: Vec<Cut>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", alias = "fechaEgreso", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "observacionesIngreso", default)]
    pub intake_note: Option<String>,
    #[serde(rename = "motivo", default)]
    pub reason: Option<Reason>,
}

impl StockUnit {
    /// Weight that has left this unit so far
    pub fn dispensed_grams(&self) -> u32 {
        self.initial_grams.saturating_sub(self.current_grams)
    }
}

/// Intake payload for `POST /api/unidades`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUnit {
    #[serde(rename = "productoId")]
    pub product_id: u64,
    #[serde(rename = "pesoInicial")]
    pub initial_grams: u32,
    #[serde(rename = "observacionesIngreso")]
    pub intake_note: Option<String>,
    #[serde(rename = "motivoId")]
    pub reason_id: Option<u64>,
}

/// Cut payload for `POST /api/unidades/{id}/particiones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCut {
    #[serde(rename = "peso")]
    pub grams: u32,
    #[serde(rename = "observacionesCorte")]
    pub note: String,
    #[serde(rename = "motivoId")]
    pub reason_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteUpdate {
    #[serde(rename = "observacionesIngreso")]
    pub intake_note: String,
}
