//! mqguard CLI: config loading, tracing setup, hardware assembly, commands.

mod cli;
mod output;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cli::{Cli, Commands, FILE_GUARD};
use mqguard_config::Config;
use mqguard_core::GasSensor;
use mqguard_core::curve::CalibrationCurve;
use mqguard_traits::AnalogSource;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let cfg = load_config(&args.config)?;
    let level = args
        .log_level
        .as_deref()
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info");
    init_tracing(level, args.json, &cfg.logging)?;

    let curve = resolve_curve(&args, &cfg)?;
    let adc = make_adc(&cfg)?;
    let mut sensor = GasSensor::builder()
        .with_adc(adc)
        .with_sensor_cfg((&cfg.sensor).into())
        .with_thresholds((&cfg.thresholds).into())
        .with_timeouts((&cfg.timeouts).into())
        .with_curve(curve)
        .build()?;

    match args.cmd {
        Commands::Calibrate => {
            let baseline = sensor
                .calibrate_in_clean_air()
                .wrap_err("clean-air calibration failed")?;
            output::print_calibration(args.json, baseline);
            Ok(())
        }
        Commands::Monitor { interval_ms, count } => {
            run_monitor(&mut sensor, args.json, interval_ms, count)
        }
        Commands::SelfCheck => {
            let resistance = sensor
                .read_average_resistance(1)
                .wrap_err("self-check read failed")?;
            if resistance == 0 {
                eyre::bail!("self-check failed: sensor reads as disconnected");
            }
            println!("self-check ok (resistance {resistance} ohm-units)");
            Ok(())
        }
    }
}

fn run_monitor(
    sensor: &mut GasSensor<Box<dyn AnalogSource>>,
    json: bool,
    interval_ms: u64,
    count: Option<u64>,
) -> eyre::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))
            .wrap_err("install ctrl-c handler")?;
    }

    let baseline = sensor
        .calibrate_in_clean_air()
        .wrap_err("clean-air calibration failed; is the sensor warmed up?")?;
    tracing::info!(baseline_ohms = baseline, "monitoring started");

    let mut emitted: u64 = 0;
    while !shutdown.load(Ordering::Relaxed) {
        // Estimate failures are recoverable; report them and keep polling.
        match sensor.estimate() {
            Ok(reading) => output::print_reading(
                json,
                reading,
                sensor.last_resistance_ohms(),
                sensor.last_ratio(),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "estimate failed");
                output::print_estimate_failure(json, &e);
            }
        }
        emitted += 1;
        if let Some(n) = count
            && emitted >= n
        {
            break;
        }
        std::thread::sleep(Duration::from_millis(interval_ms));
    }
    tracing::info!(readings = emitted, "monitoring stopped");
    Ok(())
}

/// Load and validate the TOML config; a missing file means defaults.
fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = mqguard_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// CLI `--curve` wins over the config's `curve_csv`; otherwise the built-in
/// LPG table is used.
fn resolve_curve(args: &Cli, cfg: &Config) -> eyre::Result<CalibrationCurve> {
    let path = args
        .curve
        .clone()
        .or_else(|| cfg.curve_csv.as_ref().map(Into::into));
    match path {
        Some(p) => {
            let rows = mqguard_config::load_curve_csv(&p)?;
            CalibrationCurve::try_from(rows.as_slice())
                .wrap_err_with(|| format!("curve {}", p.display()))
        }
        None => Ok(CalibrationCurve::lpg()),
    }
}

#[cfg(feature = "hardware")]
fn make_adc(cfg: &Config) -> eyre::Result<Box<dyn AnalogSource>> {
    let adc = mqguard_hardware::HardwareAdc::new(
        cfg.hardware.spi_bus,
        cfg.hardware.spi_cs,
        cfg.hardware.adc_channel,
    )?;
    Ok(Box::new(adc))
}

#[cfg(not(feature = "hardware"))]
fn make_adc(_cfg: &Config) -> eyre::Result<Box<dyn AnalogSource>> {
    Ok(Box::new(mqguard_hardware::SimulatedAdc::clean_air()))
}

fn init_tracing(level: &str, json: bool, logging: &mqguard_config::Logging) -> eyre::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let (console_plain, console_json) = if json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    };

    let file_layer = match &logging.file {
        Some(path) => {
            let path = Path::new(path);
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or(std::ffi::OsStr::new("mqguard.log"));
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(tracing_subscriber::fmt::layer().json().with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_plain)
        .with(console_json)
        .with(file_layer)
        .init();
    Ok(())
}
