//! Bounded formatted output over the board's text transport.

use crate::hal::OutputTransport;
use core::fmt::{self, Write};
use heapless::String;

/// Usable bytes per message; longer output is cut off.
pub const MESSAGE_CAPACITY: usize = 255;

/// Fixed-capacity render target that truncates instead of failing.
///
/// Truncation happens on a character boundary, so the stored text is always
/// valid UTF-8 and never longer than [`MESSAGE_CAPACITY`] bytes.
#[derive(Debug, Default)]
pub struct MessageBuffer {
    text: String<MESSAGE_CAPACITY>,
    truncated: bool,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(args: fmt::Arguments<'_>) -> Self {
        let mut buf = Self::new();
        // write_str never fails, so neither does formatting
        let _ = buf.write_fmt(args);
        buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Write for MessageBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if self.text.push_str(s).is_ok() {
            return Ok(());
        }
        for c in s.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.truncated = true;
        Ok(())
    }
}

/// Renders `args` and sends the rendered bytes, and nothing else, to `out`.
///
/// Transport failures are dropped: diagnostics are best effort.
pub fn debug_print<T: OutputTransport + ?Sized>(out: &mut T, args: fmt::Arguments<'_>) {
    let message = MessageBuffer::render(args);
    let _ = out.write(message.as_bytes());
}

/// `printf`-style front end for [`debug_print`].
///
/// ```ignore
/// adxl345_debug!(uart, "adxl345: id is {:#04x}.\n", id);
/// ```
#[macro_export]
macro_rules! adxl345_debug {
    ($out:expr, $($arg:tt)*) => {
        $crate::debug::debug_print($out, ::core::format_args!($($arg)*))
    };
}
