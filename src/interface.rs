use crate::bus::{IicGateway, SpiGateway};
use crate::critical_section::DEFAULT_CEILING;
use crate::debug;
use crate::events;
use crate::hal::{IicDriver, OutputTransport, PriorityMask, SpiDriver};
use core::fmt;
use embedded_hal::delay::DelayNs;

/// Everything the ADXL345 driver needs from the board.
///
/// Bus calls report the platform driver's own error; delay, logging and the
/// interrupt callback cannot fail.
pub trait Adxl345Interface {
    type IicError;
    type SpiError;

    fn iic_init(&mut self) -> Result<(), Self::IicError>;
    fn iic_deinit(&mut self) -> Result<(), Self::IicError>;
    fn iic_read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::IicError>;
    fn iic_write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), Self::IicError>;

    fn spi_init(&mut self) -> Result<(), Self::SpiError>;
    fn spi_deinit(&mut self) -> Result<(), Self::SpiError>;
    fn spi_read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::SpiError>;
    fn spi_write(&mut self, reg: u8, buf: &[u8]) -> Result<(), Self::SpiError>;

    fn delay_ms(&mut self, ms: u32);
    fn debug_print(&mut self, args: fmt::Arguments<'_>);
    fn receive_callback(&mut self, code: u8);
}

/// Board wiring: both bus gateways share one priority mask.
pub struct Board<I, S, D, T, M> {
    iic: IicGateway<I, M>,
    spi: SpiGateway<S, M>,
    delay: D,
    output: T,
}

impl<I, S, D, T, M> Board<I, S, D, T, M>
where
    I: IicDriver,
    S: SpiDriver,
    D: DelayNs,
    T: OutputTransport,
    M: PriorityMask + Clone,
{
    pub fn new(iic: I, spi: S, delay: D, output: T, mask: M) -> Self {
        Self::with_ceiling(iic, spi, delay, output, mask, DEFAULT_CEILING)
    }

    pub fn with_ceiling(iic: I, spi: S, delay: D, output: T, mask: M, ceiling: u8) -> Self {
        Self {
            iic: IicGateway::with_ceiling(iic, mask.clone(), ceiling),
            spi: SpiGateway::with_ceiling(spi, mask, ceiling),
            delay,
            output,
        }
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    pub fn iic_bus(&self) -> &I {
        self.iic.bus()
    }

    pub fn spi_bus(&self) -> &S {
        self.spi.bus()
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

impl<I, S, D, T, M> Adxl345Interface for Board<I, S, D, T, M>
where
    I: IicDriver,
    S: SpiDriver,
    D: DelayNs,
    T: OutputTransport,
    M: PriorityMask + Clone,
{
    type IicError = I::Error;
    type SpiError = S::Error;

    fn iic_init(&mut self) -> Result<(), I::Error> {
        self.iic.init()
    }

    fn iic_deinit(&mut self) -> Result<(), I::Error> {
        self.iic.deinit()
    }

    fn iic_read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), I::Error> {
        self.iic.read(address, reg, buf)
    }

    fn iic_write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), I::Error> {
        self.iic.write(address, reg, buf)
    }

    fn spi_init(&mut self) -> Result<(), S::Error> {
        self.spi.init()
    }

    fn spi_deinit(&mut self) -> Result<(), S::Error> {
        self.spi.deinit()
    }

    fn spi_read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), S::Error> {
        self.spi.read(reg, buf)
    }

    fn spi_write(&mut self, reg: u8, buf: &[u8]) -> Result<(), S::Error> {
        self.spi.write(reg, buf)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn debug_print(&mut self, args: fmt::Arguments<'_>) {
        debug::debug_print(&mut self.output, args);
    }

    fn receive_callback(&mut self, code: u8) {
        events::dispatch(&mut self.output, code);
    }
}
