//! Hardware Abstraction Layer (HAL) for the platform side of the interface
//!
//! These traits describe what a board must provide so the ADXL345 driver can
//! reach the sensor: an addressed bus, a point-to-point bus, a text transport
//! for diagnostics and an interrupt-priority mask. Delays use
//! [`embedded_hal::delay::DelayNs`] directly.

use std::sync::Arc;

/// Clock polarity / phase selection for the point-to-point bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiMode {
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl SpiMode {
    /// Mode the ADXL345 requires (CPOL = 1, CPHA = 1).
    pub const ADXL345: SpiMode = SpiMode::Mode3;

    /// Clock idles high.
    pub fn polarity_high(self) -> bool {
        matches!(self, SpiMode::Mode2 | SpiMode::Mode3)
    }

    /// Data captured on the second clock transition.
    pub fn captures_on_second_edge(self) -> bool {
        matches!(self, SpiMode::Mode1 | SpiMode::Mode3)
    }
}

/// Addressed multi-drop bus (I2C) as provided by the platform.
pub trait IicDriver {
    type Error;

    fn init(&mut self) -> Result<(), Self::Error>;
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Reads `buf.len()` bytes starting at `reg` from the device at 7-bit `address`.
    fn read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `buf` starting at `reg` on the device at 7-bit `address`.
    fn write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Point-to-point bus (SPI) as provided by the platform.
pub trait SpiDriver {
    type Error;

    fn init(&mut self, mode: SpiMode) -> Result<(), Self::Error>;
    fn deinit(&mut self) -> Result<(), Self::Error>;
    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
    fn write(&mut self, reg: u8, buf: &[u8]) -> Result<(), Self::Error>;
}

/// Byte-oriented text transport (usually a UART).
pub trait OutputTransport {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Interrupt-priority mask.
///
/// While the level is `n > 0`, maskable interrupts whose priority is at or
/// below `n` are held off. Level 0 masks nothing. The mask is a property of
/// the CPU, so it is modelled with shared access.
pub trait PriorityMask {
    fn level(&self) -> u8;
    fn set_level(&self, level: u8);

    /// Strengthens the mask to `level`; never weakens it.
    fn raise(&self, level: u8) {
        if level > self.level() {
            self.set_level(level);
        }
    }
}

impl<M: PriorityMask + ?Sized> PriorityMask for &M {
    fn level(&self) -> u8 {
        (**self).level()
    }

    fn set_level(&self, level: u8) {
        (**self).set_level(level)
    }

    fn raise(&self, level: u8) {
        (**self).raise(level)
    }
}

impl<M: PriorityMask + ?Sized> PriorityMask for Arc<M> {
    fn level(&self) -> u8 {
        (**self).level()
    }

    fn set_level(&self, level: u8) {
        (**self).set_level(level)
    }

    fn raise(&self, level: u8) {
        (**self).raise(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adxl345_uses_mode_3() {
        assert_eq!(SpiMode::ADXL345, SpiMode::Mode3);
        assert!(SpiMode::ADXL345.polarity_high());
        assert!(SpiMode::ADXL345.captures_on_second_edge());
        assert!(!SpiMode::Mode0.polarity_high());
        assert!(SpiMode::Mode1.captures_on_second_edge());
    }

    #[test]
    fn raise_never_lowers_the_mask() {
        let mask = crate::critical_section::SoftPriorityMask::new();
        mask.raise(2);
        assert_eq!(mask.level(), 2);
        mask.raise(1);
        assert_eq!(mask.level(), 2);
        (&mask).raise(5);
        std::sync::Arc::new(&mask).raise(3);
        assert_eq!(mask.level(), 5);
    }
}
