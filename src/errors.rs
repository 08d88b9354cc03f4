use thiserror::Error;

#[cfg(feature = "linux-hal")]
use i2cdev::linux::LinuxI2CError;

/// Failures of the shipped platform backends
#[derive(Error, Debug)]
pub enum TransportError {
    #[cfg(feature = "linux-hal")]
    #[error("I2C communication failed: {0}")]
    I2c(#[from] LinuxI2CError),

    #[error("SPI communication failed: {reason}")]
    Spi { reason: String },

    #[cfg(feature = "linux-hal")]
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bus '{bus}' used before init")]
    NotInitialized { bus: &'static str },

    #[error("Bus '{bus}' is not wired on this board")]
    Detached { bus: &'static str },
}

impl TransportError {
    /// Legacy numeric status: every failure is 1.
    pub fn status(&self) -> u8 {
        1
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Missing required configuration section: [{section}]")]
    MissingSection { section: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Collapses a bus result to the 0/1 status code older drivers expect.
pub fn status_code<E>(result: &Result<(), E>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Result type aliases for convenience
pub type TransportResult<T> = Result<T, TransportError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
