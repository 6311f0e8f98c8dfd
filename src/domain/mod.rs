//! Domain models for gputemps
//!
//! Plain data types shared by the sampler, correlator and renderers.

pub mod pci;
pub mod sample;
pub mod thermal;

pub use pci::{PciDeviceRecord, PciIdentity};
pub use sample::{Sample, Snapshot};
pub use thermal::{MetricThresholds, Temperature, ThresholdBand, Thresholds};
