//! Configuration primitives for the prep engine.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/Prepbase/config.toml on Windows
//!   $XDG_DATA_HOME/Prepbase/config.toml on Linux
//!   ~/Library/Application Support/Prepbase/config.toml on macOS
//!
//! The config tracks per-install defaults for new test sessions and the
//! question-source knobs. `PREPBASE_HOME` overrides the workspace root,
//! which the test harness relies on.

use serde::{Deserialize, Serialize};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Defaults pre-filled on the test configuration screen.
    #[serde(default)]
    pub engine: EngineSettings,
    /// Question-source behavior (bank threshold, remote toggle).
    #[serde(default)]
    pub source: SourceSettings,
}

/// Defaults for new test sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_exam")]
    pub default_exam: String,
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_exam: default_exam(),
            default_question_count: default_question_count(),
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

fn default_exam() -> String {
    "OPSC Civil Services".to_string()
}

const fn default_question_count() -> u32 {
    10
}

const fn default_duration_minutes() -> u32 {
    15
}

/// Question-source preferences tied to the local install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Bank hits at or above this count are served without a remote call.
    #[serde(default = "default_local_fast_path")]
    pub local_fast_path: u32,
    /// Whether remote generation is enabled for this install.
    #[serde(default = "default_remote_allowed")]
    pub remote_allowed: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            local_fast_path: default_local_fast_path(),
            remote_allowed: default_remote_allowed(),
        }
    }
}

const fn default_local_fast_path() -> u32 {
    3
}

const fn default_remote_allowed() -> bool {
    true
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

use anyhow::{Context, Result};
use directories::BaseDirs;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Returns the root directory where Prepbase stores data.
///
/// Order of precedence:
/// 1. `PREPBASE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("PREPBASE_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("Prepbase"))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(workspace_root()?.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    let path = config_file_path()?;
    if path.exists() {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let path = config_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = toml::to_string_pretty(config)?;
    fs::write(&path, data)?;
    Ok(())
}
