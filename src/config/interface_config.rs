use crate::bus::BusType;
use crate::critical_section::DEFAULT_CEILING;
use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;

/// Root configuration, one file per board
#[derive(Debug, Deserialize)]
pub struct InterfaceConfig {
    /// Bus the sensor is wired to
    pub interface: BusType,
    pub iic: Option<IicEntry>,
    pub spi: Option<SpiEntry>,
    /// Debug text goes to stdout when absent
    pub uart: Option<UartEntry>,
    #[serde(default)]
    pub critical_section: CriticalSectionEntry,
}

#[derive(Debug, Deserialize)]
pub struct IicEntry {
    pub path: String,
    /// 7-bit device address (0x53 with ALT ADDRESS low, 0x1D high)
    #[serde(default = "default_iic_address")]
    pub address: u8,
}

#[derive(Debug, Deserialize)]
pub struct SpiEntry {
    pub path: String,
    #[serde(default = "default_spi_speed")]
    pub max_speed_hz: u32,
}

#[derive(Debug, Deserialize)]
pub struct UartEntry {
    pub path: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

#[derive(Debug, Deserialize)]
pub struct CriticalSectionEntry {
    #[serde(default = "default_ceiling")]
    pub ceiling: u8,
}

/// The configured section for the bus the sensor is wired to
#[derive(Debug, Clone, Copy)]
pub enum BusSelection<'a> {
    Iic(&'a IicEntry),
    Spi(&'a SpiEntry),
}

impl Default for CriticalSectionEntry {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
        }
    }
}

fn default_iic_address() -> u8 {
    0x53
}

fn default_spi_speed() -> u32 {
    5_000_000
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_ceiling() -> u8 {
    DEFAULT_CEILING
}

impl InterfaceConfig {
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let parsed: InterfaceConfig = toml::from_str(content)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Section of the bus named by `interface`.
    pub fn selected(&self) -> ConfigResult<BusSelection<'_>> {
        let missing = |section: &str| ConfigError::MissingSection {
            section: section.to_string(),
        };
        match self.interface {
            BusType::Iic => self.iic.as_ref().map(BusSelection::Iic).ok_or_else(|| missing("iic")),
            BusType::Spi => self.spi.as_ref().map(BusSelection::Spi).ok_or_else(|| missing("spi")),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        match self.selected()? {
            BusSelection::Iic(iic) if iic.address > 0x7f => {
                return Err(ConfigError::InvalidValue {
                    field: "iic.address".to_string(),
                    reason: format!("{:#04x} does not fit in 7 bits", iic.address),
                });
            }
            BusSelection::Spi(spi) if spi.max_speed_hz == 0 => {
                return Err(ConfigError::InvalidValue {
                    field: "spi.max_speed_hz".to_string(),
                    reason: "must be non-zero".to_string(),
                });
            }
            _ => {}
        }

        if self.critical_section.ceiling == 0 {
            return Err(ConfigError::InvalidValue {
                field: "critical_section.ceiling".to_string(),
                reason: "0 masks no interrupts during bus transfers".to_string(),
            });
        }

        if let Some(uart) = &self.uart {
            if uart.baud_rate == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "uart.baud_rate".to_string(),
                    reason: "must be non-zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Loads config from TOML file
pub fn load_interface_config(path: &str) -> ConfigResult<InterfaceConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    InterfaceConfig::from_toml(&content)
}
