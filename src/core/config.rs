//! Configuration management for aap-jobgen.
//!
//! Handles loading defaults from TOML files. Credentials are never read
//! from here; they come from the environment only.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project used when neither the CLI nor the config names one.
pub const DEFAULT_PROJECT: &str = "ai-hacking";

/// Inventory name used for rendered templates when none is given.
pub const DEFAULT_INVENTORY: &str = "Demo Inventory";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for CLI flags
    pub defaults: DefaultsConfig,

    /// Survey labels used when submitting to the controller
    pub survey: SurveyConfig,

    /// Controller connection settings
    pub controller: ControllerSection,
}

/// Defaults applied when a flag is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Controller project name
    pub project: String,

    /// Inventory name (first available inventory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
}

/// Survey name/description attached to submitted templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub name: String,
    pub description: String,
}

/// Controller settings that are safe to keep on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSection {
    /// Fallback for `AAP_HOSTNAME`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl Config {
    /// Load configuration from the local file, then the global one, then defaults.
    pub fn load() -> anyhow::Result<Self> {
        // Try local config first
        let local_config = PathBuf::from(".aap-jobgen.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try global config
        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aap-jobgen"))
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { project: DEFAULT_PROJECT.to_string(), inventory: None }
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            name: "Playbook Variables".to_string(),
            description: "Configure playbook variables".to_string(),
        }
    }
}
