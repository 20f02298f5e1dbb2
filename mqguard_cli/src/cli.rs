//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "mqguard", version, about = "Gas leak monitor CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/mqguard.toml")]
    pub config: PathBuf,

    /// Optional response-curve CSV (strict header); overrides the config
    #[arg(long, value_name = "FILE")]
    pub curve: Option<PathBuf>,

    /// Emit readings and logs as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides the config
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Establish the clean-air baseline; must run with the sensor in clean air
    Calibrate,
    /// Calibrate, then poll the sensor periodically and report readings
    Monitor {
        /// Pause between estimates in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 2000)]
        interval_ms: u64,
        /// Stop after this many readings (default: run until Ctrl-C)
        #[arg(long, value_name = "N")]
        count: Option<u64>,
    },
    /// Quick health check (hardware presence / sim ok)
    SelfCheck,
}
