use crate::errors::TransportResult;
use crate::hal::OutputTransport;
use std::io::Write;
use std::time::Duration;
use tokio_serial::SerialPort;
use tracing::debug;

/// Baud rate of the reference board's debug UART
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

const WRITE_TIMEOUT: Duration = Duration::from_millis(100);

/// Blocking UART used as the debug text transport
pub struct SerialOutput {
    port: Box<dyn SerialPort>,
    /// Port path - useful for logging and error messages
    path: String,
}

impl SerialOutput {
    /// Open a serial port at [`DEFAULT_BAUD_RATE`]
    pub fn open(path: &str) -> TransportResult<Self> {
        Self::open_with_baud(path, DEFAULT_BAUD_RATE)
    }

    /// Open a serial port with custom baud rate
    pub fn open_with_baud(path: &str, baud_rate: u32) -> TransportResult<Self> {
        let port = tokio_serial::new(path, baud_rate)
            .timeout(WRITE_TIMEOUT)
            .open()?;
        debug!("[uart] opened {} at {} baud", path, baud_rate);

        Ok(Self {
            port,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn into_port(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl OutputTransport for SerialOutput {
    type Error = std::io::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), std::io::Error> {
        self.port.write_all(bytes)?;
        self.port.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;

    #[test]
    fn open_missing_port_fails() {
        let result = SerialOutput::open("/dev/tty-does-not-exist");
        assert!(matches!(result, Err(TransportError::Serial(_))));
    }
}
