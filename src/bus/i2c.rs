use crate::errors::{TransportError, TransportResult};
use crate::hal::IicDriver;
use i2cdev::core::{I2CDevice, I2CMessage, I2CTransfer};
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CMessage};
use tracing::debug;

/// I2C bus backed by a Linux `/dev/i2c-N` character device.
///
/// The device node is opened by `init` and closed by `deinit`.
pub struct LinuxIic {
    path: String,
    device: Option<LinuxI2CDevice>,
}

impl LinuxIic {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            device: None,
        }
    }

    /// Device node path (e.g. `/dev/i2c-1`)
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    fn device(&mut self, address: u8) -> TransportResult<&mut LinuxI2CDevice> {
        let device = self
            .device
            .as_mut()
            .ok_or(TransportError::NotInitialized { bus: "iic" })?;
        device.set_slave_address(u16::from(address))?;
        Ok(device)
    }
}

impl IicDriver for LinuxIic {
    type Error = TransportError;

    fn init(&mut self) -> TransportResult<()> {
        // address is set per transfer
        let device = LinuxI2CDevice::new(&self.path, 0)?;
        self.device = Some(device);
        debug!("[iic] opened {}", self.path);
        Ok(())
    }

    fn deinit(&mut self) -> TransportResult<()> {
        match self.device.take() {
            Some(_) => {
                debug!("[iic] closed {}", self.path);
                Ok(())
            }
            None => Err(TransportError::NotInitialized { bus: "iic" }),
        }
    }

    fn read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> TransportResult<()> {
        let device = self.device(address)?;
        let register = [reg];
        let mut messages = [LinuxI2CMessage::write(&register), LinuxI2CMessage::read(buf)];
        device.transfer(&mut messages)?;
        Ok(())
    }

    fn write(&mut self, address: u8, reg: u8, buf: &[u8]) -> TransportResult<()> {
        let device = self.device(address)?;
        let mut frame = Vec::with_capacity(buf.len() + 1);
        frame.push(reg);
        frame.extend_from_slice(buf);
        device.write(&frame)?;
        Ok(())
    }
}
