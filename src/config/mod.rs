pub mod interface_config;

pub use interface_config::{load_interface_config, BusSelection, InterfaceConfig};
