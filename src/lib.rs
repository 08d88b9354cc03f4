//! Platform interface for the ADXL345 accelerometer driver.
//!
//! Binds the driver's bus, delay, debug-print and interrupt-callback hooks to
//! concrete board peripherals, wrapping every register transfer in a
//! priority-mask critical section.

// Public modules
pub mod bus;
pub mod config;
pub mod critical_section;
pub mod debug;
pub mod errors;
pub mod events;
pub mod hal;
pub mod interface;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use bus::{BusType, Detached, HalIic, HalSpi, IicGateway, SpiGateway, WriteTransport};
pub use config::{load_interface_config, BusSelection, InterfaceConfig};
pub use critical_section::{CriticalSection, SoftPriorityMask};
pub use errors::{ConfigError, ConfigResult, TransportError, TransportResult};
pub use events::{dispatch, pending_events, InterruptEvent};
pub use hal::{IicDriver, OutputTransport, PriorityMask, SpiDriver, SpiMode};
pub use interface::{Adxl345Interface, Board};

#[cfg(feature = "linux-hal")]
pub use bus::{i2c::LinuxIic, serial::SerialOutput, spi::LinuxSpi};

use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}
