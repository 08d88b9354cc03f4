use crate::bus::embedded::HalSpi;
use crate::errors::{TransportError, TransportResult};
use crate::hal::{SpiDriver, SpiMode};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::SpidevDevice;
use tracing::debug;

/// Default SCLK for the ADXL345 (the part tops out at 5 MHz)
pub const DEFAULT_MAX_SPEED_HZ: u32 = 5_000_000;

/// SPI bus backed by a Linux `/dev/spidevB.C` node.
///
/// `init` opens the node and programs mode, word size and clock; chip select
/// is driven by the kernel for each transaction.
pub struct LinuxSpi {
    path: String,
    max_speed_hz: u32,
    device: Option<HalSpi<SpidevDevice>>,
}

impl LinuxSpi {
    pub fn new(path: &str) -> Self {
        Self::with_speed(path, DEFAULT_MAX_SPEED_HZ)
    }

    pub fn with_speed(path: &str, max_speed_hz: u32) -> Self {
        Self {
            path: path.to_string(),
            max_speed_hz,
            device: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn device(&mut self) -> TransportResult<&mut HalSpi<SpidevDevice>> {
        self.device
            .as_mut()
            .ok_or(TransportError::NotInitialized { bus: "spi" })
    }
}

fn mode_flags(mode: SpiMode) -> SpiModeFlags {
    match mode {
        SpiMode::Mode0 => SpiModeFlags::SPI_MODE_0,
        SpiMode::Mode1 => SpiModeFlags::SPI_MODE_1,
        SpiMode::Mode2 => SpiModeFlags::SPI_MODE_2,
        SpiMode::Mode3 => SpiModeFlags::SPI_MODE_3,
    }
}

fn spi_error(err: impl std::fmt::Debug) -> TransportError {
    TransportError::Spi {
        reason: format!("{:?}", err),
    }
}

impl SpiDriver for LinuxSpi {
    type Error = TransportError;

    fn init(&mut self, mode: SpiMode) -> TransportResult<()> {
        let mut device = SpidevDevice::open(&self.path).map_err(spi_error)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(self.max_speed_hz)
            .mode(mode_flags(mode))
            .build();
        device.configure(&options)?;
        self.device = Some(HalSpi::with_mode(device, mode));
        debug!("[spi] opened {} ({:?}, {} Hz)", self.path, mode, self.max_speed_hz);
        Ok(())
    }

    fn deinit(&mut self) -> TransportResult<()> {
        match self.device.take() {
            Some(_) => {
                debug!("[spi] closed {}", self.path);
                Ok(())
            }
            None => Err(TransportError::NotInitialized { bus: "spi" }),
        }
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> TransportResult<()> {
        self.device()?.read(reg, buf).map_err(spi_error)
    }

    fn write(&mut self, reg: u8, buf: &[u8]) -> TransportResult<()> {
        self.device()?.write(reg, buf).map_err(spi_error)
    }
}
