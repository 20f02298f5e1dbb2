use thiserror::Error;

/// Recoverable sensing failures. None of these abort the process; callers
/// retry calibration or estimation on their own schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("sensor not calibrated")]
    NotCalibrated,
    #[error("sensor fault: no reliable resistance reading")]
    SensorFault,
    #[error("hardware error: {0}")]
    Hardware(String),
    #[error("timeout waiting for sensor")]
    Timeout,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing analog source")]
    MissingAdc,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T, E = Report> = std::result::Result<T, E>;
pub use eyre::Report;
