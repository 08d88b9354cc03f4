//! Adapters from `embedded-hal` 1.0 bus traits to the platform traits.
//!
//! On bare metal the HAL owns and configures the peripheral before it is
//! handed over, so `init`/`deinit` have nothing left to do here.

use crate::hal::{IicDriver, SpiDriver, SpiMode};
use embedded_hal::i2c::{I2c, Operation as I2cOperation};
use embedded_hal::spi::{Operation as SpiOperation, SpiDevice};
use tracing::debug;

/// Any [`I2c`] implementation as the addressed bus.
pub struct HalIic<I> {
    i2c: I,
}

impl<I: I2c> HalIic<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> IicDriver for HalIic<I> {
    type Error = I::Error;

    fn init(&mut self) -> Result<(), I::Error> {
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), I::Error> {
        Ok(())
    }

    fn read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), I::Error> {
        self.i2c.write_read(address, &[reg], buf)
    }

    fn write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), I::Error> {
        // adjacent writes go out as one message
        self.i2c.transaction(
            address,
            &mut [I2cOperation::Write(&[reg]), I2cOperation::Write(buf)],
        )
    }
}

/// Any [`SpiDevice`] as the point-to-point bus.
///
/// The device must already be clocked in the mode passed to `init`; a mismatch
/// is only reported through tracing because the HAL fixes the mode up front.
pub struct HalSpi<S> {
    spi: S,
    expected_mode: SpiMode,
}

impl<S: SpiDevice> HalSpi<S> {
    pub fn new(spi: S) -> Self {
        Self::with_mode(spi, SpiMode::ADXL345)
    }

    /// Wraps a device the HAL configured in `mode`.
    pub fn with_mode(spi: S, mode: SpiMode) -> Self {
        Self {
            spi,
            expected_mode: mode,
        }
    }

    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiDevice> SpiDriver for HalSpi<S> {
    type Error = S::Error;

    fn init(&mut self, mode: SpiMode) -> Result<(), S::Error> {
        if mode != self.expected_mode {
            debug!(
                "[spi] requested {:?} but device was configured for {:?}",
                mode, self.expected_mode
            );
        }
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), S::Error> {
        Ok(())
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), S::Error> {
        self.spi
            .transaction(&mut [SpiOperation::Write(&[reg]), SpiOperation::Read(buf)])
    }

    fn write(&mut self, reg: u8, buf: &[u8]) -> Result<(), S::Error> {
        self.spi
            .transaction(&mut [SpiOperation::Write(&[reg]), SpiOperation::Write(buf)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind as I2cErrorKind, ErrorType as I2cErrorType};
    use embedded_hal::spi::{ErrorKind as SpiErrorKind, ErrorType as SpiErrorType};

    #[derive(Default)]
    struct FakeI2c {
        log: Vec<(u8, Vec<u8>)>,
        reply: Vec<u8>,
    }

    impl I2cErrorType for FakeI2c {
        type Error = I2cErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [I2cOperation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                match op {
                    I2cOperation::Write(bytes) => self.log.push((address, bytes.to_vec())),
                    I2cOperation::Read(buf) => {
                        if self.reply.len() < buf.len() {
                            return Err(I2cErrorKind::Overrun);
                        }
                        buf.copy_from_slice(&self.reply[..buf.len()]);
                    }
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeSpi {
        sent: Vec<u8>,
        transactions: usize,
        reply: Vec<u8>,
    }

    impl SpiErrorType for FakeSpi {
        type Error = SpiErrorKind;
    }

    impl SpiDevice for FakeSpi {
        fn transaction(&mut self, operations: &mut [SpiOperation<'_, u8>]) -> Result<(), Self::Error> {
            self.transactions += 1;
            for op in operations {
                match op {
                    SpiOperation::Write(bytes) => self.sent.extend_from_slice(bytes),
                    SpiOperation::Read(buf) => buf.copy_from_slice(&self.reply[..buf.len()]),
                    _ => return Err(SpiErrorKind::Other),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn iic_read_is_write_then_read() {
        let mut bus = HalIic::new(FakeI2c {
            reply: vec![0xE5],
            ..Default::default()
        });
        let mut id = [0u8; 1];
        bus.read(0x53, 0x00, &mut id).unwrap();
        assert_eq!(id, [0xE5]);
        assert_eq!(bus.release().log, vec![(0x53, vec![0x00])]);
    }

    #[test]
    fn iic_read_error_passes_through() {
        let mut bus = HalIic::new(FakeI2c::default());
        let mut buf = [0u8; 6];
        assert_eq!(bus.read(0x1d, 0x32, &mut buf), Err(I2cErrorKind::Overrun));
    }

    #[test]
    fn iic_write_sends_register_then_data() {
        let mut bus = HalIic::new(FakeI2c::default());
        bus.write(0x53, 0x2d, &[0x08]).unwrap();
        assert_eq!(bus.release().log, vec![(0x53, vec![0x2d]), (0x53, vec![0x08])]);
    }

    #[test]
    fn spi_transfers_stay_in_one_transaction() {
        let mut bus = HalSpi::new(FakeSpi {
            reply: vec![1, 2, 3, 4, 5, 6],
            ..Default::default()
        });
        assert!(bus.init(SpiMode::Mode3).is_ok());

        let mut axes = [0u8; 6];
        bus.read(0xf2, &mut axes).unwrap();
        bus.write(0x31, &[0x0b]).unwrap();

        assert_eq!(axes, [1, 2, 3, 4, 5, 6]);
        let spi = bus.release();
        assert_eq!(spi.transactions, 2);
        assert_eq!(spi.sent, vec![0xf2, 0x31, 0x0b]);
    }
}
