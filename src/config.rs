use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::lock_task::bridge::MIN_LOCK_TASK_API_LEVEL;
use crate::lock_task::platform::PlatformKind;

/// Bridge configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Backend that provides the lock task capability
    #[serde(default)]
    pub platform: PlatformKind,

    /// Lowest API level treated as supporting lock task mode
    #[serde(default = "default_min_api_level")]
    pub min_api_level: u32,

    /// Android backend settings
    #[serde(default)]
    pub android: AndroidConfig,

    /// Simulated backend settings
    #[serde(default)]
    pub simulated: SimulatedConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            platform: PlatformKind::default(),
            min_api_level: default_min_api_level(),
            android: AndroidConfig::default(),
            simulated: SimulatedConfig::default(),
        }
    }
}

fn default_min_api_level() -> u32 {
    MIN_LOCK_TASK_API_LEVEL
}

/// Android backend configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AndroidConfig {
    /// Task to pin; defaults to the task of the resumed activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u32>,

    /// Arguments prepended to every platform tool, e.g. `[adb, shell]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command_prefix: Vec<String>,
}

/// Simulated backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulatedConfig {
    /// API level the simulated platform reports
    #[serde(default = "default_min_api_level")]
    pub api_level: u32,

    /// Start in lock task mode
    #[serde(default)]
    pub initially_locked: bool,

    /// Reject start requests with a permission error
    #[serde(default)]
    pub deny_start: bool,

    /// Reject stop requests with a permission error
    #[serde(default)]
    pub deny_stop: bool,

    /// Fail state reads
    #[serde(default)]
    pub deny_query: bool,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            api_level: default_min_api_level(),
            initially_locked: false,
            deny_start: false,
            deny_stop: false,
            deny_query: false,
        }
    }
}

/// Get the per-user config file path
pub fn get_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "lock-task-bridge")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("bridge.yaml"))
}

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: BridgeConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Resolve the effective configuration
///
/// An explicit path must exist. Without one, the default location is used
/// if present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<BridgeConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match get_config_path() {
        Ok(path) if path.exists() => load_config(&path),
        _ => Ok(BridgeConfig::default()),
    }
}

/// Validate configuration
pub fn validate_config(config: &BridgeConfig) -> Result<()> {
    if config.min_api_level == 0 {
        anyhow::bail!("min_api_level must be at least 1");
    }

    if config.android.task_id == Some(0) {
        anyhow::bail!("android.task_id must be a positive task id");
    }

    if config.android.command_prefix.iter().any(|arg| arg.trim().is_empty()) {
        anyhow::bail!("android.command_prefix must not contain empty arguments");
    }

    Ok(())
}
