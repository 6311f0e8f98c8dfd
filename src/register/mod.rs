//! Raw hardware register access
//!
//! Junction and VRAM temperatures are not exposed through NVML on consumer
//! boards; they are read straight out of BAR0 through physical memory.

pub mod layout;
pub mod reader;
pub mod window;

pub use layout::{FieldDecoder, HardwareGeneration, RegisterField, RegisterLayout};
pub use reader::{DevMem, PhysicalMemory, RegisterReader};
pub use window::{page_floor, page_size, RegisterWindow};
