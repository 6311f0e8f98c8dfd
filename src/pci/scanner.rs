//! PCI bus scan through sysfs
//!
//! Each directory under `/sys/bus/pci/devices` is named after the device's
//! `domain:bus:slot.function` address and exposes `vendor`, `device` and a
//! `resource` table whose first line is BAR0.

use crate::domain::PciDeviceRecord;
use crate::error::PciError;

use std::fs;
use std::path::{Path, PathBuf};

/// Default sysfs location of the PCI device list
pub const DEFAULT_SYSFS_PATH: &str = "/sys/bus/pci/devices";

/// Source of the system PCI device list
pub trait PciBus {
    /// Enumerate every device on the bus
    fn scan(&self) -> Result<PciScan, PciError>;
}

/// Device list captured once at startup and held for the process lifetime
#[derive(Debug)]
pub struct PciScan {
    records: Vec<PciDeviceRecord>,
}

impl PciScan {
    pub fn new(records: Vec<PciDeviceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PciDeviceRecord] {
        &self.records
    }
}

impl Drop for PciScan {
    fn drop(&mut self) {
        log::debug!("Releasing PCI scan ({} devices)", self.records.len());
    }
}

/// Scanner reading the Linux sysfs PCI tree
#[derive(Debug, Clone)]
pub struct SysfsPciBus {
    root: PathBuf,
}

impl SysfsPciBus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for SysfsPciBus {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_PATH)
    }
}

impl PciBus for SysfsPciBus {
    fn scan(&self) -> Result<PciScan, PciError> {
        let entries = fs::read_dir(&self.root).map_err(|source| PciError::Read {
            path: self.root.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        // read_dir order is unspecified; keep first-match correlation stable.
        paths.sort();

        let records = paths
            .iter()
            .map(|path| read_device(path))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Scanned {} PCI devices under {}",
            records.len(),
            self.root.display()
        );
        Ok(PciScan::new(records))
    }
}

fn read_device(dir: &Path) -> Result<PciDeviceRecord, PciError> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let (domain, bus, device, function) = parse_address(name).ok_or_else(|| PciError::Parse {
        path: dir.to_path_buf(),
        detail: format!("'{}' is not a domain:bus:slot.function address", name),
    })?;

    let vendor_id = read_hex_attr(&dir.join("vendor"))?;
    let device_id = read_hex_attr(&dir.join("device"))?;
    let bar0 = read_bar0(&dir.join("resource"))?;

    Ok(PciDeviceRecord {
        vendor_id,
        device_id,
        domain,
        bus,
        device,
        function,
        bar0,
    })
}

/// Parse `dddd:bb:ss.f`
pub(crate) fn parse_address(name: &str) -> Option<(u32, u8, u8, u8)> {
    let (domain, rest) = name.split_once(':')?;
    let (bus, rest) = rest.split_once(':')?;
    let (slot, function) = rest.split_once('.')?;

    Some((
        u32::from_str_radix(domain, 16).ok()?,
        u8::from_str_radix(bus, 16).ok()?,
        u8::from_str_radix(slot, 16).ok()?,
        u8::from_str_radix(function, 16).ok()?,
    ))
}

fn read_attr(path: &Path) -> Result<String, PciError> {
    fs::read_to_string(path).map_err(|source| PciError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_hex<T: TryFrom<u64>>(path: &Path, text: &str) -> Result<T, PciError> {
    let digits = text.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .ok()
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| PciError::Parse {
            path: path.to_path_buf(),
            detail: format!("'{}' is not a hex value", text.trim()),
        })
}

fn read_hex_attr(path: &Path) -> Result<u16, PciError> {
    parse_hex(path, &read_attr(path)?)
}

fn read_bar0(path: &Path) -> Result<u64, PciError> {
    let table = read_attr(path)?;
    let start = table
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .ok_or_else(|| PciError::Parse {
            path: path.to_path_buf(),
            detail: "empty resource table".to_string(),
        })?;
    parse_hex(path, start)
}
