//! Privileged resources held for one run
//!
//! Fields drop in declaration order, which is the release order: terminal
//! first, then the NVML session, then the PCI scan. Every exit path, normal or
//! error, goes through that same `Drop`.

use crate::error::{AppError, Result};
use crate::lifecycle::terminal::{TerminalGuard, TerminalMode};
use crate::nvml::GpuManager;
use crate::pci::PciScan;

pub struct Session<T: TerminalMode, M: GpuManager> {
    terminal: Option<TerminalGuard<T>>,
    manager: M,
    pci: PciScan,
}

impl<T: TerminalMode, M: GpuManager> Session<T, M> {
    pub fn new(terminal: Option<TerminalGuard<T>>, manager: M, pci: PciScan) -> Self {
        Self {
            terminal,
            manager,
            pci,
        }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn pci(&self) -> &PciScan {
        &self.pci
    }

    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    /// Number of GPUs NVML reports; zero is an error
    pub fn device_count(&self) -> Result<u32> {
        let count = self
            .manager
            .device_count()
            .map_err(AppError::DeviceCount)?;
        if count == 0 {
            return Err(AppError::NoGpusFound);
        }
        log::debug!("NVML reports {} GPU(s)", count);
        Ok(count)
    }
}
