use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;

/// Reporting window of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "hoy")]
    Today,
    #[default]
    #[serde(rename = "semana")]
    Week,
    #[serde(rename = "mes")]
    Month,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Today => write!(f, "today"),
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

/// Current stock row, grouped however the backend chooses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRow {
    #[serde(rename = "tipoQueso", default)]
    pub label: Option<String>,
    #[serde(rename = "cantidad", default, deserialize_with = "lenient::count")]
    pub units: u64,
    #[serde(rename = "pesoTotal", alias = "pesoActual", default, deserialize_with = "lenient::f64_lenient")]
    pub total_grams: f64,
}

/// Sales for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "totalPeso", alias = "peso", default, deserialize_with = "lenient::f64_lenient")]
    pub total_grams: f64,
    #[serde(rename = "cantidadCortes", alias = "cortes", default, deserialize_with = "lenient::count")]
    pub cuts: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesByPeriod {
    #[serde(rename = "hoy", default)]
    pub today: Vec<SalesPoint>,
    #[serde(rename = "semana", default)]
    pub week: Vec<SalesPoint>,
    #[serde(rename = "mes", default)]
    pub month: Vec<SalesPoint>,
}

impl SalesByPeriod {
    pub fn for_period(&self, period: Period) -> &[SalesPoint] {
        match period {
            Period::Today => &self.today,
            Period::Week => &self.week,
            Period::Month => &self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "totalVendido", default, deserialize_with = "lenient::f64_lenient")]
    pub dispensed_grams: f64,
    #[serde(rename = "cantidadCortes", default, deserialize_with = "lenient::count")]
    pub cuts: u64,
    #[serde(rename = "promedioCorte", default, deserialize_with = "lenient::f64_lenient")]
    pub average_cut_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedInventoryRow {
    #[serde(rename = "nombre", alias = "tipoQueso", default)]
    pub label: Option<String>,
    #[serde(rename = "valorTotal", default, deserialize_with = "lenient::f64_lenient")]
    pub total_value: f64,
}

/// Body of `GET /api/reportes/dashboard`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardReport {
    #[serde(rename = "inventarioActual", default)]
    pub current_inventory: Vec<InventoryRow>,
    #[serde(rename = "ventas", default)]
    pub sales: SalesByPeriod,
    #[serde(rename = "topProductos", default)]
    pub top_products: Vec<TopProduct>,
    #[serde(rename = "inventarioValorizado", default)]
    pub valued_inventory: Vec<ValuedInventoryRow>,
}

/// Entry of `GET /api/alertas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "prioridad", default)]
    pub priority: Option<String>,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "detalles", default)]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Alert {
    pub fn priority_or_default(&self) -> &str {
        self.priority.as_deref().unwrap_or("baja")
    }
}
