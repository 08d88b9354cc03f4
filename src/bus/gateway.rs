use crate::critical_section::{CriticalSection, DEFAULT_CEILING};
use crate::hal::{IicDriver, PriorityMask, SpiDriver, SpiMode};
use tracing::trace;

/// Addressed-bus gateway.
///
/// Forwards init/deinit unchanged and runs every read/write inside a
/// [`CriticalSection`]. Errors come back exactly as the driver produced them.
pub struct IicGateway<B, M> {
    bus: B,
    mask: M,
    ceiling: u8,
}

impl<B: IicDriver, M: PriorityMask> IicGateway<B, M> {
    pub fn new(bus: B, mask: M) -> Self {
        Self::with_ceiling(bus, mask, DEFAULT_CEILING)
    }

    pub fn with_ceiling(bus: B, mask: M, ceiling: u8) -> Self {
        Self { bus, mask, ceiling }
    }

    pub fn init(&mut self) -> Result<(), B::Error> {
        self.bus.init()
    }

    pub fn deinit(&mut self) -> Result<(), B::Error> {
        self.bus.deinit()
    }

    pub fn read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), B::Error> {
        trace!("[iic] read addr={:#04x} reg={:#04x} len={}", address, reg, buf.len());
        let _section = CriticalSection::enter(&self.mask, self.ceiling);
        self.bus.read(address, reg, buf)
    }

    pub fn write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), B::Error> {
        trace!("[iic] write addr={:#04x} reg={:#04x} len={}", address, reg, buf.len());
        let _section = CriticalSection::enter(&self.mask, self.ceiling);
        self.bus.write(address, reg, buf)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_parts(self) -> (B, M) {
        (self.bus, self.mask)
    }
}

/// Point-to-point bus gateway. Always brings the bus up in [`SpiMode::ADXL345`].
pub struct SpiGateway<B, M> {
    bus: B,
    mask: M,
    ceiling: u8,
}

impl<B: SpiDriver, M: PriorityMask> SpiGateway<B, M> {
    pub fn new(bus: B, mask: M) -> Self {
        Self::with_ceiling(bus, mask, DEFAULT_CEILING)
    }

    pub fn with_ceiling(bus: B, mask: M, ceiling: u8) -> Self {
        Self { bus, mask, ceiling }
    }

    pub fn init(&mut self) -> Result<(), B::Error> {
        self.bus.init(SpiMode::ADXL345)
    }

    pub fn deinit(&mut self) -> Result<(), B::Error> {
        self.bus.deinit()
    }

    pub fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), B::Error> {
        trace!("[spi] read reg={:#04x} len={}", reg, buf.len());
        let _section = CriticalSection::enter(&self.mask, self.ceiling);
        self.bus.read(reg, buf)
    }

    pub fn write(&mut self, reg: u8, buf: &[u8]) -> Result<(), B::Error> {
        trace!("[spi] write reg={:#04x} len={}", reg, buf.len());
        let _section = CriticalSection::enter(&self.mask, self.ceiling);
        self.bus.write(reg, buf)
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_parts(self) -> (B, M) {
        (self.bus, self.mask)
    }
}
