//! gputemps - NVIDIA GPU temperature monitor library
//!
//! Combines the core temperature NVML reports with junction (hotspot) and
//! VRAM temperatures read straight from each GPU's register space.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions and output rendering
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models
//! - [`error`]: Error types
//! - [`lifecycle`]: Signals, terminal mode, privilege and teardown
//! - [`nvml`]: NVML abstraction layer
//! - [`pci`]: PCI bus scan and GPU correlation
//! - [`register`]: Raw register access through physical memory
//! - [`services`]: Sampling and the refresh loop

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod nvml;
pub mod pci;
pub mod register;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
