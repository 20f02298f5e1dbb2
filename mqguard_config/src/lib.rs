#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and response-curve parsing for the gas monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The curve CSV loader enforces headers and the table ordering invariants
//!   (ratios strictly decreasing, ppm strictly increasing) before the points
//!   reach the interpolator.
use serde::Deserialize;

/// Response-curve CSV schema.
///
/// Expected headers:
/// ratio,ppm
///
/// Example:
/// ratio,ppm
/// 1000,0
/// 800,10
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CurveRow {
    pub ratio: u16,
    pub ppm: u16,
}

/// Electrical and sampling parameters of the sensor circuit.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SensorCfg {
    /// Load resistor of the divider (ohm-equivalent units)
    pub load_resistance: u32,
    /// Full-scale ADC count (4095 = 12-bit)
    pub adc_max: u16,
    /// Clean-air resistance ratio, scaled by 1000
    pub clean_air_factor: u16,
    /// Samples averaged during clean-air calibration
    pub calibration_samples: u8,
    /// Samples averaged per routine estimate
    pub reading_samples: u8,
    /// Pause between consecutive samples (ms)
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

/// Classification thresholds in ppm.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
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

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Timeouts {
    /// Sampling timeout per read (ms). Also accepts alias "read_ms".
    #[serde(alias = "read_ms")]
    pub sensor_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { sensor_ms: 150 }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Hardware {
    /// SPI bus index for the MCP3208 converter
    pub spi_bus: u8,
    /// Chip-select line on that bus
    pub spi_cs: u8,
    /// ADC input channel the sensor is wired to (0..=7)
    pub adc_channel: u8,
}

impl Default for Hardware {
    fn default() -> Self {
        Self {
            spi_bus: 0,
            spi_cs: 0,
            adc_channel: 0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sensor: SensorCfg,
    pub thresholds: Thresholds,
    pub timeouts: Timeouts,
    pub logging: Logging,
    pub hardware: Hardware,
    /// Optional CSV with a custom response curve; the built-in LPG table is
    /// used when absent.
    pub curve_csv: Option<String>,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sensor
        if self.sensor.load_resistance == 0 {
            eyre::bail!("sensor.load_resistance must be > 0");
        }
        if self.sensor.adc_max == 0 {
            eyre::bail!("sensor.adc_max must be > 0");
        }
        if self.sensor.clean_air_factor == 0 {
            eyre::bail!("sensor.clean_air_factor must be > 0");
        }
        if self.sensor.calibration_samples == 0 {
            eyre::bail!("sensor.calibration_samples must be >= 1");
        }
        if self.sensor.reading_samples == 0 {
            eyre::bail!("sensor.reading_samples must be >= 1");
        }

        // Thresholds
        if self.thresholds.safe_ppm == 0 {
            eyre::bail!("thresholds.safe_ppm must be > 0");
        }
        if self.thresholds.safe_ppm >= self.thresholds.warning_ppm {
            eyre::bail!("thresholds.safe_ppm must be < thresholds.warning_ppm");
        }

        // Timeouts
        if self.timeouts.sensor_ms == 0 {
            eyre::bail!("timeouts.sensor_ms must be >= 1");
        }

        // Hardware
        if self.hardware.adc_channel > 7 {
            eyre::bail!("hardware.adc_channel must be in 0..=7");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}

/// Parse curve rows from any reader, enforcing the exact `ratio,ppm` header
/// and the table ordering invariants.
pub fn parse_curve_csv<R: std::io::Read>(reader: R) -> eyre::Result<Vec<CurveRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers: {}", e))?
        .clone();
    let expected = ["ratio", "ppm"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "curve CSV must have headers 'ratio,ppm', got: {}",
            actual.join(",")
        );
    }

    let mut rows: Vec<CurveRow> = Vec::new();
    for (idx, rec) in rdr.deserialize::<CurveRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }

    if rows.len() < 2 {
        eyre::bail!("curve requires at least two rows, got {}", rows.len());
    }
    for i in 1..rows.len() {
        if rows[i].ratio >= rows[i - 1].ratio {
            eyre::bail!(
                "curve ratios must be strictly decreasing at rows {} and {}",
                i + 1,
                i + 2
            );
        }
        if rows[i].ppm <= rows[i - 1].ppm {
            eyre::bail!(
                "curve ppm values must be strictly increasing at rows {} and {}",
                i + 1,
                i + 2
            );
        }
    }

    Ok(rows)
}

pub fn load_curve_csv(path: &std::path::Path) -> eyre::Result<Vec<CurveRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open curve CSV {:?}: {}", path, e))?;
    parse_curve_csv(std::io::BufReader::new(file))
}
