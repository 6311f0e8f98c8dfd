//! Thermal domain types
//!
//! Provides the temperature newtype and the three-band threshold model used to
//! color table output.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature in degrees Celsius
///
/// Every source this tool reads reports whole, non-negative degrees.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Temperature(u32);

impl Temperature {
    /// Create a new Temperature
    pub const fn new(celsius: u32) -> Self {
        Self(celsius)
    }

    /// Get the temperature in Celsius
    #[inline]
    pub const fn as_celsius(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

impl From<u32> for Temperature {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Temperature> for u32 {
    fn from(temp: Temperature) -> Self {
        temp.0
    }
}

/// Severity band a reading falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThresholdBand {
    /// Below the warn threshold
    Normal,
    /// At or above warn, below danger
    Warn,
    /// At or above danger
    Danger,
}

/// Warn/danger pair for one metric
///
/// Both bounds are inclusive: a reading equal to `warn` is already `Warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warn: u32,
    pub danger: u32,
}

impl Thresholds {
    /// Create a threshold pair, rejecting `warn > danger`
    pub fn new(warn: u32, danger: u32) -> Result<Self, ConfigError> {
        let thresholds = Self { warn, danger };
        thresholds.validate("thresholds")?;
        Ok(thresholds)
    }

    /// Classify a reading
    pub fn band(&self, temp: Temperature) -> ThresholdBand {
        let celsius = temp.as_celsius();
        if celsius >= self.danger {
            ThresholdBand::Danger
        } else if celsius >= self.warn {
            ThresholdBand::Warn
        } else {
            ThresholdBand::Normal
        }
    }

    pub(crate) fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.warn > self.danger {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!(
                    "warn ({}) must not exceed danger ({})",
                    self.warn, self.danger
                ),
            });
        }
        Ok(())
    }
}

/// Thresholds for every metric shown in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricThresholds {
    pub core: Thresholds,
    pub junction: Thresholds,
    pub vram: Thresholds,
}

impl Default for MetricThresholds {
    fn default() -> Self {
        Self {
            core: Thresholds {
                warn: 70,
                danger: 85,
            },
            junction: Thresholds {
                warn: 80,
                danger: 95,
            },
            vram: Thresholds {
                warn: 80,
                danger: 95,
            },
        }
    }
}

impl MetricThresholds {
    /// Check every pair is ordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.core.validate("thresholds.core")?;
        self.junction.validate("thresholds.junction")?;
        self.vram.validate("thresholds.vram")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_display() {
        let temp = Temperature::new(65);
        assert_eq!(temp.to_string(), "65°C");
    }

    #[test]
    fn test_temperature_from_u32() {
        let temp: Temperature = 65u32.into();
        assert_eq!(temp.as_celsius(), 65);
    }

    #[test]
    fn test_core_bands_are_boundary_inclusive() {
        let core = MetricThresholds::default().core;
        assert_eq!(core.band(Temperature::new(69)), ThresholdBand::Normal);
        assert_eq!(core.band(Temperature::new(70)), ThresholdBand::Warn);
        assert_eq!(core.band(Temperature::new(84)), ThresholdBand::Warn);
        assert_eq!(core.band(Temperature::new(85)), ThresholdBand::Danger);
    }

    #[test]
    fn test_junction_and_vram_bands() {
        let defaults = MetricThresholds::default();
        for thresholds in [defaults.junction, defaults.vram] {
            assert_eq!(thresholds.band(Temperature::new(79)), ThresholdBand::Normal);
            assert_eq!(thresholds.band(Temperature::new(80)), ThresholdBand::Warn);
            assert_eq!(thresholds.band(Temperature::new(94)), ThresholdBand::Warn);
            assert_eq!(thresholds.band(Temperature::new(95)), ThresholdBand::Danger);
        }
    }

    #[test]
    fn test_thresholds_reject_inverted_pair() {
        assert!(Thresholds::new(90, 80).is_err());
        assert!(Thresholds::new(80, 80).is_ok());
    }
}
