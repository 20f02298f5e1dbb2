use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("spi error: {0}")]
    Spi(String),
    #[error("adc timeout")]
    Timeout,
    #[error("unsupported bus or chip-select: {0}")]
    BadBus(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
