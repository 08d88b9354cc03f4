use adxl345_interface::{
    adxl345_debug, init_tracing, load_interface_config, pending_events, Adxl345Interface, Board,
    BusSelection, Detached, LinuxIic, LinuxSpi, SerialOutput, SoftPriorityMask, TransportError,
    WriteTransport,
};
use linux_embedded_hal::Delay;
use std::io::{self, Write};
use tracing::{error, info, warn};

const REG_DEVID: u8 = 0x00;
const REG_INT_SOURCE: u8 = 0x30;
const DEVICE_ID: u8 = 0xE5;
/// R/W bit of the SPI command byte
const SPI_READ: u8 = 0x80;
/// Power-on settle time before the first register access
const POWER_ON_DELAY_MS: u32 = 2;

fn main() {
    // RUST_LOG=debug for bus open/close, RUST_LOG=trace for every transfer
    init_tracing();

    if let Err(e) = run() {
        error!("[probe] {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("[probe] starting up...");

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    let cfg = load_interface_config(&format!("{}/interface.toml", config_path))?;
    info!("[config] sensor on {:?}", cfg.interface);

    let sink: Box<dyn Write + Send> = match &cfg.uart {
        Some(uart) => {
            let serial = SerialOutput::open_with_baud(&uart.path, uart.baud_rate)?;
            info!("[uart] debug output on {}", serial.path());
            Box::new(serial.into_port())
        }
        None => Box::new(io::stdout()),
    };
    let mut output = WriteTransport::new(sink);
    adxl345_debug!(&mut output, "adxl345: probing over {:?}.\n", cfg.interface);

    // hosted build: no BASEPRI, the mask is tracked in software
    let mask = SoftPriorityMask::new();
    let ceiling = cfg.critical_section.ceiling;

    let valid = match cfg.selected()? {
        BusSelection::Iic(entry) => {
            let bus = LinuxIic::new(&entry.path);
            let mut board = Board::with_ceiling(bus, Detached, Delay, output, &mask, ceiling);
            check_iic(&mut board, entry.address)?
        }
        BusSelection::Spi(entry) => {
            let bus = LinuxSpi::with_speed(&entry.path, entry.max_speed_hz);
            let mut board = Board::with_ceiling(Detached, bus, Delay, output, &mask, ceiling);
            check_spi(&mut board)?
        }
    };

    if !valid {
        return Err("device id mismatch, is an ADXL345 connected?".into());
    }
    info!("[probe] done");
    Ok(())
}

fn check_iic<B>(board: &mut B, address: u8) -> Result<bool, TransportError>
where
    B: Adxl345Interface<IicError = TransportError>,
{
    board.iic_init()?;
    board.delay_ms(POWER_ON_DELAY_MS);

    let mut id = [0u8; 1];
    let mut source = [0u8; 1];
    let outcome = (|| -> Result<(), TransportError> {
        board.iic_read(address, REG_DEVID, &mut id)?;
        board.iic_read(address, REG_INT_SOURCE, &mut source)
    })();
    let valid = outcome.map(|_| report(board, id[0], source[0]));

    let closed = board.iic_deinit();
    // a failed read outranks a failed teardown
    let valid = valid?;
    closed?;
    Ok(valid)
}

fn check_spi<B>(board: &mut B) -> Result<bool, TransportError>
where
    B: Adxl345Interface<SpiError = TransportError>,
{
    board.spi_init()?;
    board.delay_ms(POWER_ON_DELAY_MS);

    let mut id = [0u8; 1];
    let mut source = [0u8; 1];
    let outcome = (|| -> Result<(), TransportError> {
        board.spi_read(SPI_READ | REG_DEVID, &mut id)?;
        board.spi_read(SPI_READ | REG_INT_SOURCE, &mut source)
    })();
    let valid = outcome.map(|_| report(board, id[0], source[0]));

    let closed = board.spi_deinit();
    // a failed read outranks a failed teardown
    let valid = valid?;
    closed?;
    Ok(valid)
}

/// Prints the id and runs the interrupt callback for each pending source.
fn report<B: Adxl345Interface>(board: &mut B, id: u8, int_source: u8) -> bool {
    if id != DEVICE_ID {
        warn!("[probe] unexpected device id {:#04x}", id);
        board.debug_print(format_args!("adxl345: id is invalid.\n"));
        return false;
    }

    board.debug_print(format_args!("adxl345: id is {:#04x}.\n", id));
    for event in pending_events(int_source) {
        board.receive_callback(event.code());
    }
    true
}
