#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core gas-sensing logic (hardware-agnostic).
//!
//! This crate turns raw ADC counts from a resistive combustible-gas sensor
//! into a calibrated ppm estimate and a safety level. All hardware access
//! goes through `mqguard_traits::AnalogSource` and `mqguard_traits::Clock`.
//!
//! ## Architecture
//!
//! - **Sampling**: fixed-count averaging with zero-sample rejection
//! - **Resistance model**: integer voltage-divider inversion (`SensorCfg`)
//! - **Calibration**: clean-air baseline via the empirical clean-air factor
//! - **Estimation**: baseline ratio → ppm over the response curve (`curve`
//!   module), then threshold classification (`reading` module)
//!
//! ## Integer arithmetic
//!
//! All conversions use truncating integer division, matching the recorded
//! calibration data for the appliance. Intermediates are widened so no
//! in-range input can overflow.

// Module declarations
pub mod conversions;
pub mod curve;
pub mod error;
pub mod mocks;
pub mod reading;

use crate::curve::CalibrationCurve;
use crate::error::{BuildError, Result, SensorError};
use crate::reading::{Reading, Thresholds};
use mqguard_traits::AnalogSource;
use mqguard_traits::clock::{Clock, MonotonicClock};
use std::sync::Arc;
use std::time::Duration;

// For typed hardware error mapping
#[cfg(feature = "hardware-errors")]
use mqguard_hardware::error::HwError;

/// Fixed electrical and sampling parameters of the sensor circuit.
#[derive(Debug, Clone)]
pub struct SensorCfg {
    /// Load resistor of the voltage divider, in ohm-equivalent units.
    pub load_resistance: u32,
    /// Full-scale ADC count (4095 for the 12-bit converter on the appliance).
    pub adc_max: u16,
    /// Empirical clean-air ratio, scaled by 1000 (datasheet value 0.983).
    pub clean_air_factor: u16,
    /// Samples averaged during clean-air calibration.
    pub calibration_samples: u8,
    /// Samples averaged per routine estimate.
    pub reading_samples: u8,
    /// Pause between consecutive samples.
    pub sample_delay_ms: u64,
}

impl Default for SensorCfg {
    fn default() -> Self {
        Self {
            load_resistance: 1000,
            adc_max: 4095,
            clean_air_factor: 983,
            calibration_samples: 30,
            reading_samples: 3,
            sample_delay_ms: 50,
        }
    }
}

impl SensorCfg {
    /// Invert the load-resistor divider: counts → sensor resistance.
    ///
    /// A count of 0 means disconnected and maps to resistance 0; so does the
    /// full-scale count, where the divider numerator vanishes. Monotonically
    /// decreasing on `(0, adc_max]`. Division truncates.
    pub fn resistance_from_raw(&self, adc: u16) -> u32 {
        if adc == 0 {
            return 0;
        }
        // The trait contract is [0, adc_max]; clamp so the subtraction below
        // cannot underflow on a misbehaving source.
        let adc = adc.min(self.adc_max);
        let num = u64::from(self.load_resistance) * u64::from(self.adc_max - adc);
        (num / u64::from(adc)).min(u64::from(u32::MAX)) as u32
    }

    pub(crate) fn check(&self) -> std::result::Result<(), BuildError> {
        if self.load_resistance == 0 {
            return Err(BuildError::InvalidConfig("sensor.load_resistance must be > 0"));
        }
        if self.adc_max == 0 {
            return Err(BuildError::InvalidConfig("sensor.adc_max must be > 0"));
        }
        if self.clean_air_factor == 0 {
            return Err(BuildError::InvalidConfig("sensor.clean_air_factor must be > 0"));
        }
        if self.calibration_samples == 0 {
            return Err(BuildError::InvalidConfig("sensor.calibration_samples must be >= 1"));
        }
        if self.reading_samples == 0 {
            return Err(BuildError::InvalidConfig("sensor.reading_samples must be >= 1"));
        }
        Ok(())
    }
}

/// Timeouts and watchdogs.
#[derive(Debug, Clone)]
pub struct Timeouts {
    /// Max sensor wait per read (ms)
    pub sensor_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { sensor_ms: 150 }
    }
}

/// Gas sensor engine: owns the analog source and the calibration state.
///
/// Single-threaded by construction: calibration and estimation both take
/// `&mut self`, so a host driving the periodic loop cannot interleave them.
pub struct GasSensor<A: AnalogSource> {
    adc: A,
    cfg: SensorCfg,
    thresholds: Thresholds,
    timeouts: Timeouts,
    curve: CalibrationCurve,
    // Unified clock for deterministic pacing in tests
    clock: Arc<dyn Clock + Send + Sync>,
    // Clean-air baseline in ohm-equivalents; Some(b) implies b > 0.
    baseline_ohms: Option<u32>,

    // Telemetry from the most recent estimate, for CLI JSON and debugging
    last_resistance_ohms: Option<u32>,
    last_ratio: Option<u32>,
}

impl<A: AnalogSource> core::fmt::Debug for GasSensor<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GasSensor")
            .field("baseline_ohms", &self.baseline_ohms)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl<A: AnalogSource> GasSensor<A> {
    /// Start building a GasSensor.
    pub fn builder() -> GasSensorBuilder<A, Missing> {
        GasSensorBuilder::default()
    }

    /// True once a clean-air calibration has succeeded.
    pub fn is_calibrated(&self) -> bool {
        self.baseline_ohms.is_some()
    }

    /// Clean-air baseline resistance, if calibrated.
    pub fn baseline_ohms(&self) -> Option<u32> {
        self.baseline_ohms
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Telemetry: averaged sensor resistance from the last estimate.
    pub fn last_resistance_ohms(&self) -> Option<u32> {
        self.last_resistance_ohms
    }

    /// Telemetry: baseline ratio (percent) from the last estimate.
    pub fn last_ratio(&self) -> Option<u32> {
        self.last_ratio
    }

    /// Average `samples` raw readings and convert to sensor resistance.
    ///
    /// Zero counts are discarded as sensor faults; only positive counts enter
    /// the integer average. Returns 0 when no valid sample was collected.
    /// Blocks for `samples * sample_delay_ms` on the configured clock.
    pub fn read_average_resistance(&mut self, samples: u8) -> Result<u32, SensorError> {
        let timeout = Duration::from_millis(self.timeouts.sensor_ms);
        let delay = Duration::from_millis(self.cfg.sample_delay_ms);
        let mut sum: u32 = 0;
        let mut valid: u32 = 0;
        for i in 0..samples {
            let raw = self
                .adc
                .read_raw(timeout)
                .map_err(|e| map_adc_error_dyn(&*e))?;
            if raw > 0 {
                sum += u32::from(raw.min(self.cfg.adc_max));
                valid += 1;
            } else {
                tracing::trace!(sample = i, "discarding zero sample");
            }
            self.clock.sleep(delay);
        }
        if valid == 0 {
            tracing::warn!(samples, "no valid samples in averaging window");
            return Ok(0);
        }
        // sum <= 255 * adc_max, so the average always fits a u16 count.
        let average = (sum / valid) as u16;
        Ok(self.cfg.resistance_from_raw(average))
    }

    /// Establish the clean-air baseline. Must run in clean air.
    ///
    /// Fails without touching prior state when no reliable reading could be
    /// taken. Each success fully overwrites the previous baseline. Returns
    /// the new baseline in ohm-equivalents.
    pub fn calibrate_in_clean_air(&mut self) -> Result<u32, SensorError> {
        let average = self.read_average_resistance(self.cfg.calibration_samples)?;
        if average == 0 {
            return Err(SensorError::SensorFault);
        }
        let baseline = average.saturating_mul(100) / u32::from(self.cfg.clean_air_factor);
        if baseline == 0 {
            // Average so small the scaled baseline truncates to zero; a zero
            // baseline is never stored.
            return Err(SensorError::SensorFault);
        }
        self.baseline_ohms = Some(baseline);
        tracing::debug!(average_ohms = average, baseline_ohms = baseline, "clean-air calibration complete");
        Ok(baseline)
    }

    /// One concentration estimate: sample, normalize against the baseline,
    /// interpolate the curve, classify.
    pub fn estimate(&mut self) -> Result<Reading, SensorError> {
        let Some(baseline) = self.baseline_ohms else {
            return Err(SensorError::NotCalibrated);
        };
        let current = self.read_average_resistance(self.cfg.reading_samples)?;
        if current == 0 {
            return Err(SensorError::SensorFault);
        }
        // Integer percent of baseline; widened so large resistances cannot
        // overflow the multiply, saturated like the divider model so extreme
        // configurations cannot wrap the narrowing cast.
        let ratio =
            (u64::from(current) * 100 / u64::from(baseline)).min(u64::from(u32::MAX)) as u32;
        let ppm = self.curve.ppm_from_ratio(ratio);
        let level = self.thresholds.classify(ppm);
        self.last_resistance_ohms = Some(current);
        self.last_ratio = Some(ratio);
        tracing::trace!(current_ohms = current, ratio, ppm, level = %level, "concentration estimate");
        Ok(Reading { ppm, level })
    }
}

// Map any error to a typed SensorError, with special handling for hardware errors.
fn map_adc_error_dyn(e: &(dyn std::error::Error + 'static)) -> SensorError {
    #[cfg(feature = "hardware-errors")]
    if let Some(hw) = e.downcast_ref::<HwError>() {
        return match hw {
            HwError::Timeout => SensorError::Timeout,
            other => SensorError::Hardware(other.to_string()),
        };
    }
    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        SensorError::Timeout
    } else {
        SensorError::Hardware(s)
    }
}

// Type-state markers for the builder
pub struct Missing;
pub struct Set;

use std::marker::PhantomData;

/// Builder for `GasSensor`. The analog source is tracked in the type system;
/// everything else is validated on `build()`.
pub struct GasSensorBuilder<A, State = Missing> {
    adc: Option<A>,
    cfg: SensorCfg,
    thresholds: Thresholds,
    timeouts: Timeouts,
    curve: CalibrationCurve,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    _state: PhantomData<State>,
}

impl<A> Default for GasSensorBuilder<A, Missing> {
    fn default() -> Self {
        Self {
            adc: None,
            cfg: SensorCfg::default(),
            thresholds: Thresholds::default(),
            timeouts: Timeouts::default(),
            curve: CalibrationCurve::lpg(),
            clock: None,
            _state: PhantomData,
        }
    }
}

impl<A, State> GasSensorBuilder<A, State> {
    pub fn with_adc(self, adc: A) -> GasSensorBuilder<A, Set> {
        GasSensorBuilder {
            adc: Some(adc),
            cfg: self.cfg,
            thresholds: self.thresholds,
            timeouts: self.timeouts,
            curve: self.curve,
            clock: self.clock,
            _state: PhantomData,
        }
    }

    pub fn with_sensor_cfg(mut self, cfg: SensorCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_curve(mut self, curve: CalibrationCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }
}

impl<A: AnalogSource> GasSensorBuilder<A, Set> {
    pub fn build(self) -> Result<GasSensor<A>> {
        let adc = self.adc.ok_or(BuildError::MissingAdc)?;
        self.cfg.check()?;
        self.thresholds.check()?;
        if self.timeouts.sensor_ms == 0 {
            return Err(BuildError::InvalidConfig("timeouts.sensor_ms must be >= 1").into());
        }
        Ok(GasSensor {
            adc,
            cfg: self.cfg,
            thresholds: self.thresholds,
            timeouts: self.timeouts,
            curve: self.curve,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(MonotonicClock::new())),
            baseline_ohms: None,
            last_resistance_ohms: None,
            last_ratio: None,
        })
    }
}
