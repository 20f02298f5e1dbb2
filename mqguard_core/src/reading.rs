//! Safety classification of a concentration estimate.

use crate::error::BuildError;

/// Discrete safety level derived from a ppm estimate and the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GasLevel {
    Safe,
    Caution,
    Emergency,
}

impl GasLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            GasLevel::Safe => "safe",
            GasLevel::Caution => "caution",
            GasLevel::Emergency => "emergency",
        }
    }
}

impl core::fmt::Display for GasLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification thresholds in ppm. Invariant: `0 < safe_ppm < warning_ppm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub safe_ppm: u16,
    pub warning_ppm: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            safe_ppm: 100,
            warning_ppm: 200,
        }
    }
}

impl Thresholds {
    pub(crate) fn check(&self) -> Result<(), BuildError> {
        if self.safe_ppm == 0 {
            return Err(BuildError::InvalidConfig("thresholds.safe_ppm must be > 0"));
        }
        if self.safe_ppm >= self.warning_ppm {
            return Err(BuildError::InvalidConfig(
                "thresholds.safe_ppm must be < thresholds.warning_ppm",
            ));
        }
        Ok(())
    }

    /// `ppm < safe` → Safe; `safe <= ppm < warning` → Caution; else Emergency.
    pub fn classify(&self, ppm: u16) -> GasLevel {
        if ppm < self.safe_ppm {
            GasLevel::Safe
        } else if ppm < self.warning_ppm {
            GasLevel::Caution
        } else {
            GasLevel::Emergency
        }
    }
}

/// One concentration estimate. Recomputed on every estimation call; errors are
/// reported through `SensorError`, never encoded in the reading itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub ppm: u16,
    pub level: GasLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        let t = Thresholds::default();
        assert_eq!(t.classify(0), GasLevel::Safe);
        assert_eq!(t.classify(99), GasLevel::Safe);
        assert_eq!(t.classify(100), GasLevel::Caution);
        assert_eq!(t.classify(199), GasLevel::Caution);
        assert_eq!(t.classify(200), GasLevel::Emergency);
        assert_eq!(t.classify(10_000), GasLevel::Emergency);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let t = Thresholds {
            safe_ppm: 200,
            warning_ppm: 100,
        };
        assert!(t.check().is_err());
        let t = Thresholds {
            safe_ppm: 100,
            warning_ppm: 100,
        };
        assert!(t.check().is_err());
        let t = Thresholds {
            safe_ppm: 0,
            warning_ppm: 100,
        };
        assert!(t.check().is_err());
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(GasLevel::Safe < GasLevel::Caution);
        assert!(GasLevel::Caution < GasLevel::Emergency);
    }
}
