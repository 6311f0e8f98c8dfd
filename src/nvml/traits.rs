//! Trait definitions for GPU operations
//!
//! These traits abstract over NVML to enable testing with mocks.

use crate::domain::{PciIdentity, Temperature};
use crate::error::NvmlError;

/// Trait for the management-library view of one GPU
pub trait GpuDevice {
    /// Get the GPU index
    fn index(&self) -> u32;

    /// Get current core temperature
    fn temperature(&self) -> Result<Temperature, NvmlError>;

    /// Get the PCI location NVML reports for this handle
    fn pci_identity(&self) -> Result<PciIdentity, NvmlError>;
}

/// Trait for managing multiple GPUs
///
/// Handles borrow from the manager, so they can never outlive the session.
pub trait GpuManager {
    /// The device type returned by this manager
    type Device<'a>: GpuDevice
    where
        Self: 'a;

    /// Get the number of GPU devices
    fn device_count(&self) -> Result<u32, NvmlError>;

    /// Get a device by index
    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlError>;
}
