//! Cheese Inventory - client for the cheese shop inventory backend
//!
//! Decodes scale labels, plans intakes and cuts, aggregates unit history
//! and talks to the inventory REST API with a shared bearer session.

pub mod api;
pub mod barcode;
pub mod config;
pub mod dashboard;
pub mod elements;
pub mod error;
pub mod formatters;
pub mod forms;
pub mod history;
pub mod inventory;
pub mod loading;
pub mod models;
pub mod permissions;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::{ExportFormat, InventoryApi};
pub use config::Config;
pub use error::{ApiError, ApiResult, BarcodeError, ValidationError};
pub use loading::{LoadState, ViewLoader};
pub use permissions::Capabilities;
pub use session::{Session, SessionStore};
