//! NVML manager implementation
//!
//! Owns the NVML session. Dropping the manager shuts NVML down.

use crate::error::NvmlError;
use crate::nvml::device::NvmlDevice;
use crate::nvml::traits::GpuManager;

use nvml_wrapper::Nvml;

/// NVML manager for GPU discovery
pub struct NvmlManager {
    nvml: Nvml,
}

impl NvmlManager {
    /// Initialize NVML and create a new manager
    pub fn new() -> Result<Self, NvmlError> {
        let nvml = Nvml::init().map_err(|e| match e {
            nvml_wrapper::error::NvmlError::LibloadingError(_) => NvmlError::LibraryNotFound,
            nvml_wrapper::error::NvmlError::DriverNotLoaded => {
                NvmlError::InitializationFailed("NVIDIA driver not loaded".to_string())
            }
            nvml_wrapper::error::NvmlError::NoPermission => {
                NvmlError::InsufficientPermissions("NVML initialization".to_string())
            }
            other => NvmlError::InitializationFailed(other.to_string()),
        })?;

        log::debug!("NVML session opened");
        Ok(Self { nvml })
    }
}

impl Drop for NvmlManager {
    fn drop(&mut self) {
        // Nvml's own Drop performs nvmlShutdown right after this.
        log::debug!("Releasing NVML session");
    }
}

impl GpuManager for NvmlManager {
    type Device<'a> = NvmlDevice<'a>;

    fn device_count(&self) -> Result<u32, NvmlError> {
        self.nvml
            .device_count()
            .map_err(NvmlDevice::convert_error)
    }

    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlError> {
        let device = self.nvml.device_by_index(index).map_err(|e| match e {
            nvml_wrapper::error::NvmlError::NotFound
            | nvml_wrapper::error::NvmlError::InvalidArg => NvmlError::DeviceNotFound(index),
            other => NvmlDevice::convert_error(other),
        })?;

        Ok(NvmlDevice::new(device, index))
    }
}
