//! Configuration for spinlog

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for a [`LogWriter`](crate::LogWriter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterConfig {
    /// How long an append may wait for the buffer lock before the line is
    /// dropped, in milliseconds
    #[serde(default = "default_append_timeout_ms")]
    pub append_timeout_ms: u64,

    /// Period between background drain cycles, in milliseconds
    #[serde(default = "default_drain_period_ms")]
    pub drain_period_ms: u64,
}

fn default_append_timeout_ms() -> u64 {
    crate::DEFAULT_APPEND_TIMEOUT_MS
}

fn default_drain_period_ms() -> u64 {
    crate::DEFAULT_DRAIN_PERIOD_MS
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            append_timeout_ms: default_append_timeout_ms(),
            drain_period_ms: default_drain_period_ms(),
        }
    }
}

impl WriterConfig {
    /// The append lock bound as a Duration
    pub fn append_timeout(&self) -> Duration {
        Duration::from_millis(self.append_timeout_ms)
    }

    /// The drain period as a Duration
    pub fn drain_period(&self) -> Duration {
        Duration::from_millis(self.drain_period_ms)
    }
}

/// Top-level configuration for the `sl` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Destination log file
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Writer tunables
    #[serde(default)]
    pub writer: WriterConfig,
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spinlog")
        .join("spinlog.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            writer: WriterConfig::default(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("spinlog").join("config.yml")),
            Some(PathBuf::from("spinlog.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
