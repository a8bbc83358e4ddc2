//! TOML-based configuration for the admin tool.
//!
//! Reads and writes [`AppConfig`] from an explicit path (`--config`) or the
//! platform-appropriate default:
//! - Windows:  `%APPDATA%\Multiseat\config.toml`
//! - Linux:    `~/.config/multiseat/config.toml`
//! - macOS:    `~/Library/Application Support/Multiseat/config.toml`
//!
//! Example:
//!
//! ```toml
//! [general]
//! max_seats = 10
//! log_level = "info"
//! log_file = "multiseat.log"
//!
//! [accounts]
//! default_password = "password"
//! remote_group = "Remote Desktop Users"
//!
//! [network]
//! interface_alias = "Ethernet"
//!
//! [commands]
//! timeout_secs = 60
//!
//! [apply]
//! require_devices = false
//! ```
//!
//! # Serde default values
//!
//! Every section and field has a `#[serde(default)]`, so an empty file, a
//! missing section, or an older file without newer fields all load cleanly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use multiseat_core::{SeatId, MAX_SEATS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::apply_config::ApplyPolicy;
use crate::application::manage_users::AccountPolicy;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but makes no sense.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub apply: ApplyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Number of seats offered to the operator (`Seat 1` … `Seat N`).
    #[serde(default = "default_max_seats")]
    pub max_seats: SeatId,
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Append-only operations log, relative to the working directory.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountsConfig {
    /// Password given to every seat account.  Stored in plain text.
    #[serde(default = "default_password")]
    pub default_password: String,
    /// Local group that grants remote-session access.
    #[serde(default = "default_remote_group")]
    pub remote_group: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Interface alias whose connection is shared.
    #[serde(default = "default_interface_alias")]
    pub interface_alias: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandsConfig {
    /// Upper bound for any single external command, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApplyConfig {
    /// Fail `apply` when a seat with a user has no devices.
    #[serde(default)]
    pub require_devices: bool,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_max_seats() -> SeatId {
    MAX_SEATS
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_file() -> PathBuf {
    PathBuf::from("multiseat.log")
}
fn default_password() -> String {
    "password".to_string()
}
fn default_remote_group() -> String {
    "Remote Desktop Users".to_string()
}
fn default_interface_alias() -> String {
    "Ethernet".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_seats: default_max_seats(),
            log_level: default_log_level(),
            log_file: default_log_file(),
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            default_password: default_password(),
            remote_group: default_remote_group(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interface_alias: default_interface_alias(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Conversions into application settings ─────────────────────────────────────

impl AppConfig {
    /// Rejects values that would make the tool unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero seat maximum, a zero
    /// timeout, or an empty group or interface name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_seats == 0 {
            return Err(ConfigError::Invalid("general.max_seats must be at least 1".into()));
        }
        if self.commands.timeout_secs == 0 {
            return Err(ConfigError::Invalid("commands.timeout_secs must be at least 1".into()));
        }
        if self.accounts.remote_group.trim().is_empty() {
            return Err(ConfigError::Invalid("accounts.remote_group must not be empty".into()));
        }
        if self.network.interface_alias.trim().is_empty() {
            return Err(ConfigError::Invalid("network.interface_alias must not be empty".into()));
        }
        Ok(())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.commands.timeout_secs)
    }

    pub fn account_policy(&self) -> AccountPolicy {
        AccountPolicy {
            password: self.accounts.default_password.clone(),
            remote_group: self.accounts.remote_group.clone(),
        }
    }

    pub fn apply_policy(&self) -> ApplyPolicy {
        if self.apply.require_devices {
            ApplyPolicy::RequireDevices
        } else {
            ApplyPolicy::Advisory
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value fails validation.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<AppConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the `Multiseat` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Multiseat"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("multiseat"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Multiseat")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("multiseat_test_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_app_config_default_values() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.general.max_seats, 10);
        assert_eq!(cfg.general.log_file, PathBuf::from("multiseat.log"));
        assert_eq!(cfg.accounts.default_password, "password");
        assert_eq!(cfg.accounts.remote_group, "Remote Desktop Users");
        assert_eq!(cfg.network.interface_alias, "Ethernet");
        assert_eq!(cfg.command_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.apply_policy(), ApplyPolicy::Advisory);
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_section_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
[accounts]
default_password = "Welcome1"

[apply]
require_devices = true
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.accounts.default_password, "Welcome1");
        assert_eq!(cfg.accounts.remote_group, "Remote Desktop Users");
        assert_eq!(cfg.apply_policy(), ApplyPolicy::RequireDevices);
        assert_eq!(cfg.account_policy().password, "Welcome1");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let result: Result<AppConfig, toml::de::Error> = toml::from_str("[[[ not valid toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_seats_and_zero_timeout() {
        let mut cfg = AppConfig::default();
        cfg.general.max_seats = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        let mut cfg = AppConfig::default();
        cfg.commands.timeout_secs = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        let path = temp_dir().join("config.toml");

        let cfg = load_config_from(&path).expect("load");

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.general.max_seats = 6;
        cfg.network.interface_alias = "Wi-Fi".to_string();

        // Act
        save_config_to(&cfg, &path).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_rejects_invalid_values() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[network]\ninterface_alias = \"  \"\n").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
