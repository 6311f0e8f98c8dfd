//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::MetricThresholds;
use crate::error::ConfigError;
use crate::pci::scanner::DEFAULT_SYSFS_PATH;
use crate::register::reader::DEFAULT_MEMORY_PATH;
use crate::register::HardwareGeneration;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Register access settings
    pub hardware: HardwareConfig,
    /// Color thresholds for the table
    pub thresholds: MetricThresholds,
}

impl Config {
    /// Reject values the refresh loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.interval_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        self.thresholds.validate()
    }

    /// Time between refresh cycles
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.general.interval_ms)
    }
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Refresh interval in milliseconds
    pub interval_ms: u64,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            verbose: false,
        }
    }
}

/// Where registers and PCI records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Register layout to decode with
    pub generation: HardwareGeneration,
    /// Physical memory device
    pub memory_path: PathBuf,
    /// Root of the sysfs PCI device tree
    pub pci_sysfs_path: PathBuf,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            generation: HardwareGeneration::default(),
            memory_path: PathBuf::from(DEFAULT_MEMORY_PATH),
            pci_sysfs_path: PathBuf::from(DEFAULT_SYSFS_PATH),
        }
    }
}
