//! Rendering of readings and failures for console and JSON consumers.
//!
//! The JSON forms keep the appliance's legacy telemetry shape: a failed
//! estimate is reported as `ppm: -1, level: "error"` so downstream consumers
//! need no schema change.

use mqguard_core::error::SensorError;
use mqguard_core::reading::Reading;

pub fn print_reading(json: bool, reading: Reading, resistance_ohms: Option<u32>, ratio: Option<u32>) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ppm": reading.ppm,
                "level": reading.level.as_str(),
                "resistance_ohms": resistance_ohms,
                "ratio": ratio,
            })
        );
    } else {
        println!("{:>5} ppm  [{}]", reading.ppm, reading.level);
    }
}

pub fn print_estimate_failure(json: bool, err: &SensorError) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "ppm": -1,
                "level": "error",
                "error": err.to_string(),
            })
        );
    } else {
        eprintln!("reading failed: {err}");
    }
}

pub fn print_calibration(json: bool, baseline_ohms: u32) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "calibrated",
                "baseline_ohms": baseline_ohms,
            })
        );
    } else {
        println!("calibration complete: baseline {baseline_ohms} ohm-units");
    }
}
