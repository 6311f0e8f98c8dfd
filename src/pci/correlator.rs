//! Matching NVML handles to PCI devices
//!
//! NVML knows which GPU it is talking about but not where its registers live;
//! the PCI scan knows BAR0 but not which NVML index a device has. A device is
//! the same only if combined id, domain, bus and slot all agree.

use crate::domain::{PciDeviceRecord, PciIdentity};
use crate::error::CorrelationError;

/// Find the PCI record backing the GPU at `index`
///
/// First match wins. A record that agrees on some but not all four fields is
/// skipped.
pub fn correlate<'a>(
    index: u32,
    identity: &PciIdentity,
    records: &'a [PciDeviceRecord],
) -> Result<&'a PciDeviceRecord, CorrelationError> {
    let record = records
        .iter()
        .find(|record| record.matches(identity))
        .ok_or(CorrelationError {
            index,
            identity: *identity,
        })?;

    log::trace!("GPU {} correlated with {}", index, record);
    Ok(record)
}
