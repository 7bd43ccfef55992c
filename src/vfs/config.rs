//! Transport configuration

use crate::types::DEFAULT_CREATE_MODE;
use crate::vfs::error::{VfsError, VfsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of a `LocalTransport`
///
/// ```json
/// { "create_mode": 420, "sync_on_close": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Permission bits for files created by `w`/`a` modes
    pub create_mode: u32,
    /// fsync before releasing the descriptor in `close`
    pub sync_on_close: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            create_mode: DEFAULT_CREATE_MODE,
            sync_on_close: true,
        }
    }
}

impl TransportConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> VfsResult<Self> {
        let config: TransportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> VfsResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> VfsResult<()> {
        if self.create_mode & !0o7777 != 0 {
            return Err(VfsError::ConfigError(format!(
                "create_mode {:o} has bits outside 0o7777",
                self.create_mode
            )));
        }
        Ok(())
    }
}
