//! Stock units: listing, intake, cuts, notes and deletion.

use reqwest::Method;

use super::InventoryApi;
use crate::error::ApiResult;
use crate::models::{NewCut, NewUnit, NoteUpdate, StockUnit};

impl InventoryApi {
    /// Units currently in stock
    pub async fn units(&self) -> ApiResult<Vec<StockUnit>> {
        let units: Vec<StockUnit> = self.get_json("/api/unidades", "units").await?;
        log::info!("Loaded {} units", units.len());
        Ok(units)
    }

    /// Every unit ever registered, active or depleted
    pub async fn history(&self) -> ApiResult<Vec<StockUnit>> {
        let units: Vec<StockUnit> = self.get_json("/api/unidades/historial", "history").await?;
        log::info!("Loaded {} history records", units.len());
        Ok(units)
    }

    pub async fn create_unit(&self, unit: &NewUnit) -> ApiResult<()> {
        self.execute(Method::POST, "/api/unidades", Some(unit), "Failed to register unit")
            .await?;
        log::info!(
            "Registered unit of product {} ({}g)",
            unit.product_id,
            unit.initial_grams
        );
        Ok(())
    }

    pub async fn update_note(&self, unit_id: u64, note: &str) -> ApiResult<()> {
        let body = NoteUpdate {
            intake_note: note.to_string(),
        };
        self.execute(
            Method::PUT,
            &format!("/api/unidades/{unit_id}"),
            Some(&body),
            "Failed to update unit",
        )
        .await
    }

    /// Record a cut. The backend re-checks the remaining stock and its
    /// message is returned verbatim if it refuses.
    pub async fn create_cut(&self, unit_id: u64, cut: &NewCut) -> ApiResult<()> {
        self.execute(
            Method::POST,
            &format!("/api/unidades/{unit_id}/particiones"),
            Some(cut),
            "Failed to register cut",
        )
        .await?;
        log::info!("Cut registered on unit #{unit_id}: {}g", cut.grams);
        Ok(())
    }

    /// Soft delete: the unit leaves the active list but stays in history
    pub async fn delete_unit(&self, unit_id: u64) -> ApiResult<()> {
        self.delete(&format!("/api/unidades/{unit_id}"), "Failed to delete unit")
            .await
    }

    /// Remove the unit from history for good
    pub async fn delete_unit_permanently(&self, unit_id: u64) -> ApiResult<()> {
        log::warn!("Permanently deleting unit #{unit_id}");
        self.delete(
            &format!("/api/unidades/{unit_id}/hard"),
            "Failed to delete unit from history",
        )
        .await
    }
}
