//! Logged-in session and its on-disk copy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ApiResult;
use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// JSON file holding the session between CLI invocations
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no session. A corrupt file is logged and ignored.
    pub fn load(&self) -> ApiResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
                log::info!("Created directory: {}", parent.display());
            }
        }
        let json = serde_json::to_string_pretty(session).map_err(|source| {
            crate::error::ApiError::Serialize {
                context: "session",
                source,
            }
        })?;
        std::fs::write(&self.path, json)?;
        log::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> ApiResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            log::info!("Removed session file {}", self.path.display());
        }
        Ok(())
    }
}
