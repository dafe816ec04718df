use anyhow::Context;
use numbet_core::ClientConfig;
use numbet_game::StakeLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub stake_min: u64,
    pub stake_max: u64,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        let limits = StakeLimits::default();
        Self {
            api_url: client.api_url,
            request_timeout_secs: client.request_timeout.as_secs(),
            stake_min: limits.min,
            stake_max: limits.max,
            verbose: false,
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numbet")
            .join("config.json")
    }

    /// Load from `path`, or fall back to defaults when the file is missing.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn stake_limits(&self) -> numbet_game::Result<StakeLimits> {
        StakeLimits::new(self.stake_min, self.stake_max)
    }
}
