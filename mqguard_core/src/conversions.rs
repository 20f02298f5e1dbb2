//! Mappings from the TOML config schema (`mqguard_config`) to core types.

use crate::curve::{CalibrationCurve, CurvePoint};
use crate::reading::Thresholds;
use crate::{SensorCfg, Timeouts};

impl From<&mqguard_config::SensorCfg> for SensorCfg {
    fn from(c: &mqguard_config::SensorCfg) -> Self {
        Self {
            load_resistance: c.load_resistance,
            adc_max: c.adc_max,
            clean_air_factor: c.clean_air_factor,
            calibration_samples: c.calibration_samples,
            reading_samples: c.reading_samples,
            sample_delay_ms: c.sample_delay_ms,
        }
    }
}

impl From<&mqguard_config::Thresholds> for Thresholds {
    fn from(c: &mqguard_config::Thresholds) -> Self {
        Self {
            safe_ppm: c.safe_ppm,
            warning_ppm: c.warning_ppm,
        }
    }
}

impl From<&mqguard_config::Timeouts> for Timeouts {
    fn from(c: &mqguard_config::Timeouts) -> Self {
        Self {
            sensor_ms: c.sensor_ms,
        }
    }
}

impl TryFrom<&[mqguard_config::CurveRow]> for CalibrationCurve {
    type Error = eyre::Report;
    fn try_from(rows: &[mqguard_config::CurveRow]) -> Result<Self, Self::Error> {
        CalibrationCurve::new(
            rows.iter()
                .map(|r| CurvePoint {
                    ratio: r.ratio,
                    ppm: r.ppm,
                })
                .collect(),
        )
    }
}
