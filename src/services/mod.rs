//! Service layer
//!
//! The sampler produces one snapshot per cycle; the monitor drives cycles.

pub mod monitor;
pub mod sampler;

pub use monitor::{Monitor, MonitorConfig, MonitorState, TerminationReason};
pub use sampler::{Sampler, TelemetrySource};
