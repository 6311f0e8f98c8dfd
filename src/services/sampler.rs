//! Temperature sampler
//!
//! One cycle reads every GPU in index order. A failure anywhere, for any
//! device, fails the whole cycle: a table or record with one silently wrong
//! row is worse than no output.

use crate::domain::{PciDeviceRecord, Sample, Snapshot};
use crate::error::{AppError, Result};
use crate::nvml::{GpuDevice, GpuManager};
use crate::pci::correlate;
use crate::register::{PhysicalMemory, RegisterReader};

/// Anything that can produce a full snapshot per cycle
pub trait TelemetrySource {
    fn sample_cycle(&self) -> Result<Snapshot>;
}

/// Combines NVML core temperature with raw junction/VRAM registers
pub struct Sampler<'a, M: GpuManager, P: PhysicalMemory> {
    manager: &'a M,
    records: &'a [PciDeviceRecord],
    reader: RegisterReader<P>,
    device_count: u32,
}

impl<'a, M: GpuManager, P: PhysicalMemory> Sampler<'a, M, P> {
    /// Create a sampler over `device_count` GPUs and the startup PCI scan
    pub fn new(
        manager: &'a M,
        records: &'a [PciDeviceRecord],
        reader: RegisterReader<P>,
        device_count: u32,
    ) -> Self {
        Self {
            manager,
            records,
            reader,
            device_count,
        }
    }

    /// Read one GPU: handle, core temp, PCI identity, correlation, registers
    pub fn sample_device(&self, index: u32, timestamp: i64) -> Result<Sample> {
        let device = self
            .manager
            .device_by_index(index)
            .map_err(|source| AppError::HandleLookup { index, source })?;

        let core = device
            .temperature()
            .map_err(|source| AppError::TemperatureQuery { index, source })?;

        let identity = device
            .pci_identity()
            .map_err(|source| AppError::PciInfoQuery { index, source })?;

        let record = correlate(index, &identity, self.records)?;

        let junction = self.reader.junction(record.bar0)?;
        let vram = self.reader.vram(record.bar0)?;

        Ok(Sample::new(index, core, junction, vram, timestamp))
    }

    /// Read every GPU, stamping samples with `timestamp`
    pub fn sample_cycle_at(&self, timestamp: i64) -> Result<Snapshot> {
        let gpus = (0..self.device_count)
            .map(|index| self.sample_device(index, timestamp))
            .collect::<Result<Vec<_>>>()?;
        Ok(Snapshot::new(timestamp, gpus))
    }
}

impl<M: GpuManager, P: PhysicalMemory> TelemetrySource for Sampler<'_, M, P> {
    fn sample_cycle(&self) -> Result<Snapshot> {
        self.sample_cycle_at(chrono::Utc::now().timestamp())
    }
}
