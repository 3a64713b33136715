use crate::error::Result;
use crate::physics::config::PhysicsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Client settings, loadable from JSON. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub physics: PhysicsConfig,
    /// Fixed physics step
    pub tick_interval_ms: u64,
    /// Cadence of outbound position/look packets
    pub position_update_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            tick_interval_ms: 50,
            position_update_interval_ms: 50,
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn position_update_interval(&self) -> Duration {
        Duration::from_millis(self.position_update_interval_ms)
    }
}
