pub mod embedded;
pub mod gateway;

#[cfg(feature = "linux-hal")]
pub mod i2c;
#[cfg(feature = "linux-hal")]
pub mod serial;
#[cfg(feature = "linux-hal")]
pub mod spi;

pub use embedded::{HalIic, HalSpi};
pub use gateway::{IicGateway, SpiGateway};

use crate::errors::TransportError;
use crate::hal::{IicDriver, OutputTransport, SpiDriver, SpiMode};
use serde::Deserialize;
use std::io::Write;

/// Which transport the sensor is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusType {
    #[serde(alias = "i2c")]
    Iic,
    Spi,
}

/// Stand-in for a bus the board does not wire up.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl IicDriver for Detached {
    type Error = TransportError;

    fn init(&mut self) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "iic" })
    }

    fn deinit(&mut self) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "iic" })
    }

    fn read(&mut self, _address: u8, _reg: u8, _buf: &mut [u8]) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "iic" })
    }

    fn write(&mut self, _address: u8, _reg: u8, _buf: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "iic" })
    }
}

impl SpiDriver for Detached {
    type Error = TransportError;

    fn init(&mut self, _mode: SpiMode) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "spi" })
    }

    fn deinit(&mut self) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "spi" })
    }

    fn read(&mut self, _reg: u8, _buf: &mut [u8]) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "spi" })
    }

    fn write(&mut self, _reg: u8, _buf: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::Detached { bus: "spi" })
    }
}

/// Text transport over anything that implements [`std::io::Write`]
pub struct WriteTransport<W> {
    inner: W,
}

impl<W: Write> WriteTransport<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputTransport for WriteTransport<W> {
    type Error = std::io::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), std::io::Error> {
        self.inner.write_all(bytes)?;
        self.inner.flush()
    }
}
