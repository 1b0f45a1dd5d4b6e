//! Dashboard aggregates, alerts and inventory exports.

use std::fmt;

use super::InventoryApi;
use crate::error::ApiResult;
use crate::models::{Alert, DashboardReport};

/// File formats the backend can export the inventory to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    fn path_segment(self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl InventoryApi {
    pub async fn dashboard(&self) -> ApiResult<DashboardReport> {
        self.get_json("/api/reportes/dashboard", "dashboard").await
    }

    pub async fn alerts(&self) -> ApiResult<Vec<Alert>> {
        self.get_json("/api/alertas", "alerts").await
    }

    /// Dashboard and alerts fetched concurrently
    pub async fn dashboard_with_alerts(&self) -> ApiResult<(DashboardReport, Vec<Alert>)> {
        let (dashboard, alerts) = tokio::join!(self.dashboard(), self.alerts());
        Ok((dashboard?, alerts?))
    }

    /// Raw bytes of the exported file, as produced by the backend
    pub async fn export_inventory(&self, format: ExportFormat) -> ApiResult<Vec<u8>> {
        let url = self.url(&format!("/api/export/inventario/{}", format.path_segment()));
        log::debug!("GET {url}");
        let response = self
            .send(self.client.get(&url), "Failed to export inventory")
            .await?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {format} export ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}
