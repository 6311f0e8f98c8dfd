//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the first readable file from the default locations
    ///
    /// A file that exists but fails to parse is an error rather than
    /// silently falling through to the next location.
    pub fn load_default() -> Result<Option<Config>, ConfigError> {
        Self::load_first(Self::default_paths())
    }

    pub(crate) fn load_first<I>(paths: I) -> Result<Option<Config>, ConfigError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            if path.is_file() {
                let config = Self::load(&path)?;
                log::info!("Loaded config from {}", path.display());
                return Ok(Some(config));
            }
        }
        Ok(None)
    }

    /// Get default configuration file paths
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/gputemps/config.toml"));

        // User config
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("gputemps").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("gputemps.toml"));

        paths
    }
}
