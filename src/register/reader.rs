//! Raw register reads
//!
//! [`DevMem`] opens the physical memory device, maps one page, loads one
//! word and releases everything before returning. [`RegisterReader`] turns
//! that word into a temperature using the active [`RegisterLayout`].

use crate::domain::Temperature;
use crate::error::MemoryMapError;
use crate::register::layout::{RegisterField, RegisterLayout};
use crate::register::window::{page_size, RegisterWindow};

use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

/// Default raw physical memory accessor
pub const DEFAULT_MEMORY_PATH: &str = "/dev/mem";

/// Word-granular access to physical memory
pub trait PhysicalMemory {
    /// Read the 32-bit word at a physical address
    fn read_u32(&self, address: u64) -> Result<u32, MemoryMapError>;
}

/// Physical memory through a `/dev/mem`-style device node
#[derive(Debug, Clone)]
pub struct DevMem {
    path: PathBuf,
    page_size: u64,
}

impl DevMem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            page_size: page_size(),
        }
    }
}

impl Default for DevMem {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_PATH)
    }
}

impl PhysicalMemory for DevMem {
    fn read_u32(&self, address: u64) -> Result<u32, MemoryMapError> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_SYNC)
            .open(&self.path)
            .map_err(|source| MemoryMapError::Open {
                path: self.path.clone(),
                source,
            })?;

        let window = RegisterWindow::map(&file, address, self.page_size)?;
        Ok(window.read_u32())
        // window unmaps, then file closes
    }
}

/// Decodes temperature registers relative to a device's BAR0
pub struct RegisterReader<P> {
    memory: P,
    layout: RegisterLayout,
}

impl<P: PhysicalMemory> RegisterReader<P> {
    pub fn new(memory: P, layout: RegisterLayout) -> Self {
        Self { memory, layout }
    }

    /// Read and decode one register field
    pub fn read(&self, bar0: u64, field: &RegisterField) -> Result<Temperature, MemoryMapError> {
        let target = bar0
            .checked_add(field.offset)
            .ok_or(MemoryMapError::AddressOverflow {
                base: bar0,
                offset: field.offset,
            })?;

        let raw = self.memory.read_u32(target)?;
        let celsius = field.decoder.decode(raw);
        log::trace!(
            "Register {:#x} = {:#010x} -> {}°C ({:?})",
            target,
            raw,
            celsius,
            field.decoder
        );
        Ok(Temperature::new(celsius))
    }

    /// Junction (hotspot) temperature
    pub fn junction(&self, bar0: u64) -> Result<Temperature, MemoryMapError> {
        self.read(bar0, &self.layout.junction)
    }

    /// VRAM temperature
    pub fn vram(&self, bar0: u64) -> Result<Temperature, MemoryMapError> {
        self.read(bar0, &self.layout.vram)
    }
}
