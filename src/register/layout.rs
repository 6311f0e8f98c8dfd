//! Register layouts per hardware generation
//!
//! The offsets and bit fields below are undocumented vendor constants. They
//! have only been observed on one GPU generation and nothing in this crate
//! validates them elsewhere; selecting a layout for other hardware will read
//! plausible-looking garbage. New generations get a new variant, never a
//! guess.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BAR0-relative offset of the junction (hotspot) register
pub const HOTSPOT_REGISTER_OFFSET: u64 = 0x0002_046C;

/// BAR0-relative offset of the VRAM temperature register
pub const VRAM_REGISTER_OFFSET: u64 = 0x0000_E2A8;

/// How a raw 32-bit register word turns into degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecoder {
    /// Bits 8..=15
    SecondByte,
    /// Bits 0..=11 in 1/32 °C steps
    FixedPointTwelveBit,
}

impl FieldDecoder {
    pub fn decode(self, raw: u32) -> u32 {
        match self {
            Self::SecondByte => (raw >> 8) & 0xff,
            Self::FixedPointTwelveBit => (raw & 0x0fff) / 0x20,
        }
    }
}

/// One temperature register: where it is and how to read it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterField {
    pub offset: u64,
    pub decoder: FieldDecoder,
}

/// Register fields for every raw-read metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    pub junction: RegisterField,
    pub vram: RegisterField,
}

/// Known hardware generations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareGeneration {
    /// GA10x-class boards (GDDR6X); the only layout seen so far
    #[default]
    Ampere,
}

impl HardwareGeneration {
    pub fn layout(self) -> RegisterLayout {
        match self {
            Self::Ampere => RegisterLayout {
                junction: RegisterField {
                    offset: HOTSPOT_REGISTER_OFFSET,
                    decoder: FieldDecoder::SecondByte,
                },
                vram: RegisterField {
                    offset: VRAM_REGISTER_OFFSET,
                    decoder: FieldDecoder::FixedPointTwelveBit,
                },
            },
        }
    }
}

impl fmt::Display for HardwareGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ampere => write!(f, "ampere"),
        }
    }
}
