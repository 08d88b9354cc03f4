//! ADXL345 interrupt sources and their log lines.

use crate::debug::debug_print;
use crate::hal::OutputTransport;

/// Logged for any code outside [`InterruptEvent`].
pub const UNKNOWN_MESSAGE: &str = "adxl345: unknown code.\n";

/// Interrupt sources, numbered by their bit position in INT_SOURCE.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptEvent {
    Overrun = 0x00,
    Watermark = 0x01,
    FreeFall = 0x02,
    Inactivity = 0x03,
    Activity = 0x04,
    DoubleTap = 0x05,
    SingleTap = 0x06,
    DataReady = 0x07,
}

impl InterruptEvent {
    /// Highest bit first, the order the sensor driver reports them in.
    pub const ALL: [InterruptEvent; 8] = [
        InterruptEvent::DataReady,
        InterruptEvent::SingleTap,
        InterruptEvent::DoubleTap,
        InterruptEvent::Activity,
        InterruptEvent::Inactivity,
        InterruptEvent::FreeFall,
        InterruptEvent::Watermark,
        InterruptEvent::Overrun,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.code() == code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u8 {
        1 << self.code()
    }

    pub fn message(self) -> &'static str {
        match self {
            InterruptEvent::DataReady => "adxl345: irq data ready.\n",
            InterruptEvent::SingleTap => "adxl345: irq single tap.\n",
            InterruptEvent::DoubleTap => "adxl345: irq double tap.\n",
            InterruptEvent::Activity => "adxl345: irq activity.\n",
            InterruptEvent::Inactivity => "adxl345: irq inactivity.\n",
            InterruptEvent::FreeFall => "adxl345: irq free fall.\n",
            InterruptEvent::Watermark => "adxl345: irq water mark.\n",
            InterruptEvent::Overrun => "adxl345: irq overrun.\n",
        }
    }
}

impl TryFrom<u8> for InterruptEvent {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Self::from_code(code).ok_or(code)
    }
}

/// Log line for a raw event code.
pub fn message_for(code: u8) -> &'static str {
    match InterruptEvent::from_code(code) {
        Some(event) => event.message(),
        None => UNKNOWN_MESSAGE,
    }
}

/// Writes exactly one line describing `code` to `out`.
pub fn dispatch<T: OutputTransport + ?Sized>(out: &mut T, code: u8) {
    debug_print(out, format_args!("{}", message_for(code)));
}

/// Events flagged in an INT_SOURCE value, data ready first.
pub fn pending_events(int_source: u8) -> impl Iterator<Item = InterruptEvent> {
    InterruptEvent::ALL
        .into_iter()
        .filter(move |event| int_source & event.mask() != 0)
}
