//! PCI bus access
//!
//! Enumerates physical devices once at startup and pairs NVML handles with
//! the record that owns their register space.

pub mod correlator;
pub mod scanner;

pub use correlator::correlate;
pub use scanner::{PciBus, PciScan, SysfsPciBus};
