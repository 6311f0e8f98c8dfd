//! Per-cycle readings
//!
//! A [`Sample`] exists only when all three temperatures were read; a
//! [`Snapshot`] exists only when every device in the cycle produced a Sample.

use crate::domain::Temperature;
use serde::Serialize;

/// One complete reading for one GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub index: u32,
    pub core: Temperature,
    pub junction: Temperature,
    pub vram: Temperature,
    /// Cycle timestamp (unix seconds); carried once per record at snapshot level
    #[serde(skip)]
    pub sampled_at: i64,
}

impl Sample {
    pub fn new(
        index: u32,
        core: Temperature,
        junction: Temperature,
        vram: Temperature,
        sampled_at: i64,
    ) -> Self {
        Self {
            index,
            core,
            junction,
            vram,
            sampled_at,
        }
    }
}

/// All samples from one refresh cycle, in device index order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub timestamp: i64,
    pub gpus: Vec<Sample>,
}

impl Snapshot {
    pub fn new(timestamp: i64, gpus: Vec<Sample>) -> Self {
        Self { timestamp, gpus }
    }

    pub fn len(&self) -> usize {
        self.gpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_serializes_plain_integers() {
        let sample = Sample::new(
            2,
            Temperature::new(45),
            Temperature::new(50),
            Temperature::new(30),
            1_700_000_000,
        );
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"index":2,"core":45,"junction":50,"vram":30}"#);
    }
}
