//! PCI identity types
//!
//! [`PciDeviceRecord`] is what the bus scan found; [`PciIdentity`] is what NVML
//! says a GPU handle sits on. Correlation compares the two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PCI location and id as reported by NVML for one device handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PciIdentity {
    /// Combined id: device id in the high 16 bits, vendor id in the low 16
    pub pci_device_id: u32,
    pub domain: u32,
    pub bus: u32,
    /// Device slot on the bus
    pub device: u32,
}

impl PciIdentity {
    pub fn new(pci_device_id: u32, domain: u32, bus: u32, device: u32) -> Self {
        Self {
            pci_device_id,
            domain,
            bus,
            device,
        }
    }
}

impl fmt::Display for PciIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id {:#010x} at {:04x}:{:02x}:{:02x}",
            self.pci_device_id, self.domain, self.bus, self.device
        )
    }
}

/// One device found on the system PCI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PciDeviceRecord {
    pub vendor_id: u16,
    pub device_id: u16,
    pub domain: u32,
    pub bus: u8,
    /// Device slot on the bus
    pub device: u8,
    pub function: u8,
    /// Start of base address region 0
    pub bar0: u64,
}

impl PciDeviceRecord {
    /// Vendor and device id packed the way NVML reports them
    pub fn combined_id(&self) -> u32 {
        (u32::from(self.device_id) << 16) | u32::from(self.vendor_id)
    }

    /// True only if id, domain, bus and slot all agree
    pub fn matches(&self, identity: &PciIdentity) -> bool {
        self.combined_id() == identity.pci_device_id
            && self.domain == identity.domain
            && u32::from(self.bus) == identity.bus
            && u32::from(self.device) == identity.device
    }
}

impl fmt::Display for PciDeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:02x}:{:02x}.{} [{:04x}:{:04x}] BAR0 {:#x}",
            self.domain,
            self.bus,
            self.device,
            self.function,
            self.vendor_id,
            self.device_id,
            self.bar0
        )
    }
}
