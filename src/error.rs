//! Unified error types for gputemps
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::domain::PciIdentity;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error type
///
/// Every variant names the step that failed, so the diagnostic printed by
/// `main` tells the user where sampling stopped.
#[derive(Error, Debug)]
pub enum AppError {
    /// Effective user is not root
    #[error("This program requires root privileges")]
    PrivilegeRequired,

    /// NVML session could not be established
    #[error("Failed to initialize NVML: {0}")]
    NvmlInit(#[source] NvmlError),

    /// PCI bus scan failed
    #[error("Failed to scan PCI bus: {0}")]
    PciScan(#[from] PciError),

    /// NVML refused to report the device count
    #[error("Failed to get device count: {0}")]
    DeviceCount(#[source] NvmlError),

    /// No GPUs detected in the system
    #[error("No NVIDIA GPUs found")]
    NoGpusFound,

    /// Handle lookup for a device index failed
    #[error("Failed to get handle for GPU {index}: {source}")]
    HandleLookup { index: u32, source: NvmlError },

    /// Core temperature query failed
    #[error("Failed to get GPU temperature for GPU {index}: {source}")]
    TemperatureQuery { index: u32, source: NvmlError },

    /// PCI identity query failed
    #[error("Failed to get PCI info for GPU {index}: {source}")]
    PciInfoQuery { index: u32, source: NvmlError },

    /// NVML device has no matching PCI device
    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    /// Raw register access failed
    #[error("Register read failed: {0}")]
    MemoryMap(#[from] MemoryMapError),

    /// Terminal could not be switched to unbuffered mode
    #[error("Failed to set up terminal: {0}")]
    TerminalSetup(#[source] std::io::Error),

    /// Termination handlers could not be installed
    #[error("Failed to install signal handlers: {0}")]
    SignalHandler(#[from] ctrlc::Error),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record serialization failed
    #[error("Failed to encode record: {0}")]
    Output(#[from] serde_json::Error),

    /// Building a table frame failed
    #[error("Failed to format table: {0}")]
    Format(#[from] std::fmt::Error),

    /// IO error (writing output, waiting for input)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from NVML wrapper operations
#[derive(Error, Debug)]
pub enum NvmlError {
    /// Failed to initialize NVML library
    #[error("{0}")]
    InitializationFailed(String),

    /// NVML library not found
    #[error("NVML library not found. Is the NVIDIA driver installed?")]
    LibraryNotFound,

    /// Device not found at index
    #[error("GPU device not found at index {0}")]
    DeviceNotFound(u32),

    /// Operation not supported by this GPU
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Insufficient permissions
    #[error("Insufficient permissions: {0}. Try running with sudo.")]
    InsufficientPermissions(String),

    /// GPU is lost (fallen off bus, etc.)
    #[error("GPU is lost or has become inaccessible")]
    GpuLost,

    /// Unknown NVML error
    #[error("{0}")]
    Unknown(String),
}

/// Errors from scanning the PCI bus through sysfs
#[derive(Error, Debug)]
pub enum PciError {
    /// A sysfs directory or attribute could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A sysfs attribute held unexpected content
    #[error("malformed {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

/// No PCI device matched the identity NVML reported for a GPU
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no PCI device matches GPU {index} ({identity})")]
pub struct CorrelationError {
    pub index: u32,
    pub identity: PciIdentity,
}

/// Errors from mapping and reading raw physical memory
#[derive(Error, Debug)]
pub enum MemoryMapError {
    /// The physical memory device could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The page containing the register could not be mapped
    #[error("failed to map page {page:#x} for register {address:#x}: {source}")]
    Map {
        address: u64,
        page: u64,
        source: std::io::Error,
    },

    /// The register word is not naturally aligned and would leave the window
    #[error("register {address:#x} is not 4-byte aligned")]
    Unaligned { address: u64 },

    /// Base address plus register offset overflowed the address space
    #[error("register offset {offset:#x} overflows base address {base:#x}")]
    AddressOverflow { base: u64, offset: u64 },
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
