use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::zone::ZoneConfig;

const DEFAULT_CONFIG_FILE: &str = "dnstest.toml";

/// Configuration for the `dnstest` companion binary.
///
/// The library itself takes no configuration; this only drives the binary
/// that serves a zone file for manual testing.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Zone served on the loopback listener
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnstest.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(zone) = overrides.zone_path {
            self.zone.path = Some(zone);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.zone.path.as_deref() {
            None => Err(ConfigError::Validation(
                "No zone file configured".to_string(),
            )),
            Some(path) if path.trim().is_empty() => Err(ConfigError::Validation(
                "Zone file path is empty".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub zone_path: Option<String>,
    pub log_level: Option<String>,
}
