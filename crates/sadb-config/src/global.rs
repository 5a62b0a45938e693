//! Global configuration for sadb
//!
//! Located at `~/.config/sadb/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default `adb` binary, resolved through `PATH`
pub const DEFAULT_ADB_PATH: &str = "adb";

/// Default bound for `wait-for-device` after `root`/`unroot` restarts adbd
pub const DEFAULT_RESTART_TIMEOUT_SECS: u64 = 5;

/// Global sadb configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub adb: AdbConfig,
    pub timeouts: TimeoutsConfig,
}

/// Settings for the adb binary itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdbConfig {
    /// Path to the adb binary. A leading `~` is expanded.
    pub path: String,
    /// Port passed as `-P` when starting the adb server
    pub server_port: Option<u16>,
}

impl Default for AdbConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_ADB_PATH.to_string(),
            server_port: None,
        }
    }
}

/// Command timeouts, in seconds. Absent values mean "wait forever".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    /// Bound applied to every command
    pub command_secs: Option<u64>,
    /// Bound for the device to come back after `root`/`unroot`
    pub restart_secs: u64,
    /// Bound for an explicit `wait-for-device`
    pub wait_for_device_secs: Option<u64>,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            command_secs: None,
            restart_secs: DEFAULT_RESTART_TIMEOUT_SECS,
            wait_for_device_secs: None,
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.clone(),
            source: e,
        })?;
        config.validate()?;

        tracing::debug!("Loaded config from {:?}: adb path={}", path, config.adb.path);

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sadb").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check that the loaded values are usable
    pub fn validate(&self) -> Result<()> {
        if self.adb.path.trim().is_empty() {
            return Err(ConfigError::Invalid("adb.path must not be empty".to_string()));
        }
        if self.adb.server_port == Some(0) {
            return Err(ConfigError::Invalid("adb.server_port must not be 0".to_string()));
        }
        Ok(())
    }

    /// Path of the adb binary with `~` expanded
    pub fn adb_path(&self) -> String {
        shellexpand::tilde(&self.adb.path).into_owned()
    }

    /// Bound applied to ordinary commands
    pub fn command_timeout(&self) -> Option<Duration> {
        self.timeouts.command_secs.map(Duration::from_secs)
    }

    /// Bound for the device to reappear after adbd restarts
    pub fn restart_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.restart_secs)
    }

    /// Bound for an explicit `wait-for-device`
    pub fn wait_for_device_timeout(&self) -> Option<Duration> {
        self.timeouts.wait_for_device_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert_eq!(config.adb.path, "adb");
        assert_eq!(config.adb.server_port, None);
        assert_eq!(config.command_timeout(), None);
        assert_eq!(config.restart_timeout(), Duration::from_secs(5));
        assert_eq!(config.wait_for_device_timeout(), None);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[adb]
path = "/opt/platform-tools/adb"
server_port = 5038

[timeouts]
command_secs = 30
restart_secs = 10
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.adb.path, "/opt/platform-tools/adb");
        assert_eq!(config.adb.server_port, Some(5038));
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.restart_timeout(), Duration::from_secs(10));
        assert_eq!(config.wait_for_device_timeout(), None);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: GlobalConfig = toml::from_str("[timeouts]\ncommand_secs = 3\n").unwrap();
        assert_eq!(config.adb.path, "adb");
        assert_eq!(config.timeouts.restart_secs, DEFAULT_RESTART_TIMEOUT_SECS);
    }

    #[test]
    fn test_adb_path_expands_tilde() {
        let mut config = GlobalConfig::default();
        config.adb.path = "~/Android/platform-tools/adb".to_string();
        let expanded = config.adb_path();
        assert!(!expanded.starts_with('~'), "tilde not expanded: {}", expanded);
        assert!(expanded.ends_with("/Android/platform-tools/adb"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GlobalConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = GlobalConfig::default();
        config.adb.server_port = Some(5040);
        config.timeouts.wait_for_device_secs = Some(60);
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[adb\npath = ").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }

    #[test]
    fn test_load_rejects_empty_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[adb]\npath = \"  \"\n").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
