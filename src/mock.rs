//! Mock implementations for testing
//!
//! Provides mock GPU devices, physical memory, terminal and input for unit
//! testing without real hardware.

use crate::domain::{PciDeviceRecord, PciIdentity, Temperature};
use crate::error::{MemoryMapError, NvmlError, PciError};
use crate::lifecycle::{InputWaiter, TerminalMode};
use crate::nvml::{GpuDevice, GpuManager};
use crate::pci::{PciBus, PciScan};

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// Step at which a mock device fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Temperature,
    PciInfo,
}

/// Mock GPU device for testing
#[derive(Debug, Clone)]
pub struct MockDevice {
    index: u32,
    temperature: Temperature,
    identity: PciIdentity,
    failure: Option<MockFailure>,
}

impl MockDevice {
    /// Create a new mock device sitting on bus `0x41 + index`
    pub fn new(index: u32) -> Self {
        Self {
            index,
            temperature: Temperature::new(45),
            identity: PciIdentity::new(0x2204_10de, 0, 0x41 + index, 0),
            failure: None,
        }
    }

    /// Builder: set core temperature
    pub fn with_temperature(mut self, celsius: u32) -> Self {
        self.temperature = Temperature::new(celsius);
        self
    }

    /// Builder: set reported PCI identity
    pub fn with_identity(mut self, identity: PciIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Builder: fail at the given step
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn identity(&self) -> PciIdentity {
        self.identity
    }

    /// PCI record matching this device's identity
    pub fn pci_record(&self, bar0: u64) -> PciDeviceRecord {
        PciDeviceRecord {
            vendor_id: (self.identity.pci_device_id & 0xffff) as u16,
            device_id: (self.identity.pci_device_id >> 16) as u16,
            domain: self.identity.domain,
            bus: self.identity.bus as u8,
            device: self.identity.device as u8,
            function: 0,
            bar0,
        }
    }
}

impl GpuDevice for MockDevice {
    fn index(&self) -> u32 {
        self.index
    }

    fn temperature(&self) -> Result<Temperature, NvmlError> {
        if self.failure == Some(MockFailure::Temperature) {
            return Err(NvmlError::NotSupported("mock temperature".to_string()));
        }
        Ok(self.temperature)
    }

    fn pci_identity(&self) -> Result<PciIdentity, NvmlError> {
        if self.failure == Some(MockFailure::PciInfo) {
            return Err(NvmlError::GpuLost);
        }
        Ok(self.identity)
    }
}

/// Mock GPU manager for testing
#[derive(Debug)]
pub struct MockManager {
    devices: Vec<MockDevice>,
    lookups: Cell<u32>,
    fail_from_lookup: Option<u32>,
}

impl MockManager {
    pub fn new(devices: Vec<MockDevice>) -> Self {
        Self {
            devices,
            lookups: Cell::new(0),
            fail_from_lookup: None,
        }
    }

    /// Builder: every handle lookup from the `n`th (0-based) on fails
    pub fn failing_from_lookup(mut self, n: u32) -> Self {
        self.fail_from_lookup = Some(n);
        self
    }

    /// Number of handle lookups served so far
    pub fn lookups(&self) -> u32 {
        self.lookups.get()
    }
}

impl GpuManager for MockManager {
    type Device<'a> = MockDevice;

    fn device_count(&self) -> Result<u32, NvmlError> {
        Ok(self.devices.len() as u32)
    }

    fn device_by_index(&self, index: u32) -> Result<Self::Device<'_>, NvmlError> {
        let lookup = self.lookups.get();
        self.lookups.set(lookup + 1);

        if self.fail_from_lookup.is_some_and(|n| lookup >= n) {
            return Err(NvmlError::GpuLost);
        }

        self.devices
            .get(index as usize)
            .cloned()
            .ok_or(NvmlError::DeviceNotFound(index))
    }
}

/// PCI bus returning a fixed device list
#[derive(Debug, Default)]
pub struct MockPciBus {
    records: Vec<PciDeviceRecord>,
    scans: Cell<u32>,
}

impl MockPciBus {
    pub fn new(records: Vec<PciDeviceRecord>) -> Self {
        Self {
            records,
            scans: Cell::new(0),
        }
    }

    pub fn scans(&self) -> u32 {
        self.scans.get()
    }
}

impl PciBus for MockPciBus {
    fn scan(&self) -> Result<PciScan, PciError> {
        self.scans.set(self.scans.get() + 1);
        Ok(PciScan::new(self.records.clone()))
    }
}

/// Sparse physical memory: unmapped addresses fail like a refused mmap
#[derive(Debug, Default)]
pub struct MockMemory {
    words: HashMap<u64, u32>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: place a register word
    pub fn with_word(mut self, address: u64, raw: u32) -> Self {
        self.words.insert(address, raw);
        self
    }

    /// Builder: place words so a device reads the given junction/VRAM values
    pub fn with_temperatures(self, bar0: u64, junction: u32, vram: u32) -> Self {
        self.with_word(bar0 + 0x2046c, junction << 8)
            .with_word(bar0 + 0xe2a8, vram * 32)
    }
}

impl crate::register::PhysicalMemory for MockMemory {
    fn read_u32(&self, address: u64) -> Result<u32, MemoryMapError> {
        self.words
            .get(&address)
            .copied()
            .ok_or_else(|| MemoryMapError::Map {
                address,
                page: address & !0xfff,
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
    }
}

/// Terminal that records mode changes
#[derive(Debug)]
pub struct MockTerminal {
    events: Rc<RefCell<Vec<&'static str>>>,
    fail_enter: bool,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            events: Rc::new(RefCell::new(Vec::new())),
            fail_enter: false,
        }
    }

    /// A terminal whose setup fails
    pub fn failing() -> Self {
        Self {
            fail_enter: true,
            ..Self::new()
        }
    }

    /// Shared log of "enter"/"restore" calls
    pub fn events(&self) -> Rc<RefCell<Vec<&'static str>>> {
        Rc::clone(&self.events)
    }
}

impl TerminalMode for MockTerminal {
    fn enter(&mut self) -> io::Result<()> {
        self.events.borrow_mut().push("enter");
        if self.fail_enter {
            return Err(io::Error::new(io::ErrorKind::Other, "not a tty"));
        }
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.events.borrow_mut().push("restore");
        Ok(())
    }
}

/// Waiter that returns scripted key presses without sleeping
#[derive(Debug, Default)]
pub struct MockWaiter {
    keys: VecDeque<bool>,
    waits: Vec<Duration>,
}

impl MockWaiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: outcome of successive waits; afterwards waits time out
    pub fn with_keys(keys: impl IntoIterator<Item = bool>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            waits: Vec::new(),
        }
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl InputWaiter for MockWaiter {
    fn wait(&mut self, timeout: Duration) -> io::Result<bool> {
        self.waits.push(timeout);
        Ok(self.keys.pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::PhysicalMemory;

    #[test]
    fn test_mock_device_defaults() {
        let device = MockDevice::new(1);
        assert_eq!(device.index(), 1);
        assert_eq!(device.temperature().unwrap().as_celsius(), 45);
        assert_eq!(device.pci_identity().unwrap().bus, 0x42);
    }

    #[test]
    fn test_mock_record_matches_identity() {
        let device = MockDevice::new(0);
        assert!(device.pci_record(0xfb00_0000).matches(&device.identity()));
    }

    #[test]
    fn test_mock_manager_fails_from_lookup() {
        let manager = MockManager::new(vec![MockDevice::new(0)]).failing_from_lookup(1);
        assert!(manager.device_by_index(0).is_ok());
        assert!(manager.device_by_index(0).is_err());
        assert_eq!(manager.lookups(), 2);
    }

    #[test]
    fn test_mock_memory_temperatures() {
        let memory = MockMemory::new().with_temperatures(0x1000_0000, 70, 40);
        assert_eq!(memory.read_u32(0x1002_046c).unwrap(), 70 << 8);
        assert_eq!(memory.read_u32(0x1000_e2a8).unwrap(), 40 * 32);
        assert!(memory.read_u32(0x1000_0000).is_err());
    }
}
