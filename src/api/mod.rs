//! Client for the inventory REST backend.
//!
//! Every call after login carries the session's bearer token. A `401` from
//! any endpoint drops the shared session so later calls fail fast with
//! `NotAuthenticated` until the user logs in again.

mod auth;
mod catalog;
mod client;
mod elements;
mod reports;
mod units;
mod users;

use std::sync::Arc;
use tokio::sync::RwLock;

use reqwest::Client;

use crate::config::Config;
use crate::error::ApiResult;
use crate::permissions::Capabilities;
use crate::session::Session;

pub use reports::ExportFormat;

/// Inventory backend client. Cheap to clone; clones share the session.
#[derive(Debug, Clone)]
pub struct InventoryApi {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) session: Arc<RwLock<Option<Session>>>,
}

impl InventoryApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        log::info!("Creating inventory API client for {}", config.api_url);
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cheese_inventory/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Client with default settings against `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn capabilities(&self) -> Capabilities {
        Capabilities::for_session(self.session.read().await.as_ref())
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
