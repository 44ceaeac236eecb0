//! Configuration loader and validator
//!
//! Loads driver settings from TOML files in the configs/ directory and
//! turns them into the [`DriverConfig`] the driver runs with.

use crate::classic::constants::{
    DEFAULT_ADDRESS, DEFAULT_INIT_ATTEMPTS, DEFAULT_INIT_RETRY_DELAY, DEFAULT_READ_DELAY,
    MIN_READ_DELAY,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Runtime settings of a driver instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// 7-bit device address
    pub address: u16,

    /// Pause between register select and read (at least 200us)
    pub read_delay: Duration,

    /// Open attempts before initialization gives up
    pub init_attempts: u32,

    /// Pause after each failed open attempt
    pub init_retry_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            read_delay: DEFAULT_READ_DELAY,
            init_attempts: DEFAULT_INIT_ATTEMPTS,
            init_retry_delay: DEFAULT_INIT_RETRY_DELAY,
        }
    }
}

impl DriverConfig {
    /// Check the settings against what the hardware tolerates
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::Invalid(format!(
                "address 0x{:02X} is not a 7-bit I2C address",
                self.address
            )));
        }

        if self.read_delay < MIN_READ_DELAY {
            return Err(ConfigError::Invalid(format!(
                "read delay must be at least {}us, got {}us",
                MIN_READ_DELAY.as_micros(),
                self.read_delay.as_micros()
            )));
        }

        if self.init_attempts == 0 {
            return Err(ConfigError::Invalid(
                "init_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bus adapter settings
    #[serde(default)]
    pub bus: BusSettings,

    /// Controller settings
    #[serde(default)]
    pub controller: ControllerSettings,
}

/// Bus adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusSettings {
    /// Adapter device node
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            device: default_device(),
        }
    }
}

/// Controller settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerSettings {
    /// Device address (0x52 for all Wii extension controllers)
    #[serde(default = "default_address")]
    pub address: u16,

    /// Microseconds between register select and read
    #[serde(default = "default_read_delay_us")]
    pub read_delay_us: u64,

    /// Open attempts at startup
    #[serde(default = "default_init_attempts")]
    pub init_attempts: u32,

    /// Milliseconds between open attempts
    #[serde(default = "default_init_retry_delay_ms")]
    pub init_retry_delay_ms: u64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            read_delay_us: default_read_delay_us(),
            init_attempts: default_init_attempts(),
            init_retry_delay_ms: default_init_retry_delay_ms(),
        }
    }
}

fn default_device() -> String { "/dev/i2c-1".to_string() }
fn default_address() -> u16 { DEFAULT_ADDRESS }
fn default_read_delay_us() -> u64 { DEFAULT_READ_DELAY.as_micros() as u64 }
fn default_init_attempts() -> u32 { DEFAULT_INIT_ATTEMPTS }
fn default_init_retry_delay_ms() -> u64 { DEFAULT_INIT_RETRY_DELAY.as_millis() as u64 }

impl Config {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        debug!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.device.trim().is_empty() {
            return Err(ConfigError::Invalid("bus.device must not be empty".to_string()));
        }

        self.driver().validate()
    }

    /// Driver settings described by this configuration
    pub fn driver(&self) -> DriverConfig {
        let controller = &self.controller;
        DriverConfig {
            address: controller.address,
            read_delay: Duration::from_micros(controller.read_delay_us),
            init_attempts: controller.init_attempts,
            init_retry_delay: Duration::from_millis(controller.init_retry_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = Config::default();
        let driver = config.driver();

        assert_eq!(config.bus.device, "/dev/i2c-1");
        assert_eq!(driver, DriverConfig::default());
        assert_eq!(driver.address, 0x52);
        assert_eq!(driver.read_delay, Duration::from_micros(2000));
        assert_eq!(driver.init_attempts, 10);
        assert_eq!(driver.init_retry_delay, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_config_minimal() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.driver(), DriverConfig::default());
    }

    #[test]
    fn test_valid_config_full() {
        let config = Config::from_toml(
            r#"
            [bus]
            device = "/dev/i2c-3"

            [controller]
            address = 0x52
            read_delay_us = 200
            init_attempts = 3
            init_retry_delay_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.bus.device, "/dev/i2c-3");
        let driver = config.driver();
        assert_eq!(driver.read_delay, Duration::from_micros(200));
        assert_eq!(driver.init_attempts, 3);
        assert_eq!(driver.init_retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_read_delay() {
        let result = Config::from_toml("[controller]\nread_delay_us = 199\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 200us"));
    }

    #[test]
    fn test_invalid_init_attempts() {
        let result = Config::from_toml("[controller]\ninit_attempts = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_address() {
        let config = DriverConfig {
            address: 0xA4,
            ..DriverConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_device() {
        let result = Config::from_toml("[bus]\ndevice = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml("[controller]\naddress = \"fifty-two\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load("configs/does-not-exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
