use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{defaults, endpoints, paths};
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::session::RepairSession;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub repair: RepairSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairSettings {
    pub max_iterations: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendSettings {
                base_url: endpoints::DEFAULT_BASE_URL.to_string(),
                timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            },
            repair: RepairSettings {
                max_iterations: defaults::MAX_ITERATIONS,
            },
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MendError::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Build an HTTP gateway pointed at the configured backend.
    pub fn build_gateway(&self) -> Result<HttpGateway> {
        Ok(HttpGateway::new()?
            .with_base_url(&self.backend.base_url)
            .with_timeout(Duration::from_secs(self.backend.timeout_secs))?)
    }

    /// Build a ready-to-use repair session from the current settings.
    pub fn build_session(&self) -> Result<RepairSession> {
        let gateway = self.build_gateway()?;
        Ok(RepairSession::new(Box::new(gateway))
            .with_default_iterations(self.repair.max_iterations))
    }
}
