//! Mock platform pieces shared by the unit tests.

use crate::hal::{IicDriver, OutputTransport, PriorityMask, SpiDriver, SpiMode};
use std::sync::{Arc, Mutex};

/// Error returned by the mock buses, carrying a platform status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub u8);

/// Priority mask that remembers every level written to it.
#[derive(Debug, Default)]
pub struct RecordingMask {
    state: Mutex<(u8, Vec<u8>)>,
}

impl RecordingMask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<u8> {
        self.state.lock().unwrap().1.clone()
    }
}

impl PriorityMask for RecordingMask {
    fn level(&self) -> u8 {
        self.state.lock().unwrap().0
    }

    fn set_level(&self, level: u8) {
        let mut state = self.state.lock().unwrap();
        state.0 = level;
        state.1.push(level);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusCall {
    Init,
    InitMode(SpiMode),
    Deinit,
    Read { address: Option<u8>, reg: u8, len: usize, level: u8 },
    Write { address: Option<u8>, reg: u8, data: Vec<u8>, level: u8 },
}

/// Register-file bus usable as either transport.
///
/// Records each call together with the mask level observed while the
/// transfer was running.
pub struct MockBus {
    pub registers: [u8; 64],
    pub calls: Vec<BusCall>,
    pub fail_with: Option<MockError>,
    pub panic_on_transfer: bool,
    mask: Arc<RecordingMask>,
}

impl MockBus {
    pub fn new(mask: Arc<RecordingMask>) -> Self {
        Self {
            registers: [0; 64],
            calls: Vec::new(),
            fail_with: None,
            panic_on_transfer: false,
            mask,
        }
    }

    pub fn failing(mask: Arc<RecordingMask>, code: u8) -> Self {
        Self {
            fail_with: Some(MockError(code)),
            ..Self::new(mask)
        }
    }

    fn outcome(&self) -> Result<(), MockError> {
        if self.panic_on_transfer {
            panic!("bus fault");
        }
        match self.fail_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read_regs(&mut self, address: Option<u8>, reg: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.calls.push(BusCall::Read {
            address,
            reg,
            len: buf.len(),
            level: self.mask.level(),
        });
        self.outcome()?;
        let start = (reg & 0x3f) as usize;
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.registers[(start + i) % self.registers.len()];
        }
        Ok(())
    }

    fn write_regs(&mut self, address: Option<u8>, reg: u8, buf: &[u8]) -> Result<(), MockError> {
        self.calls.push(BusCall::Write {
            address,
            reg,
            data: buf.to_vec(),
            level: self.mask.level(),
        });
        self.outcome()?;
        let start = (reg & 0x3f) as usize;
        for (i, byte) in buf.iter().enumerate() {
            self.registers[(start + i) % 64] = *byte;
        }
        Ok(())
    }
}

impl IicDriver for MockBus {
    type Error = MockError;

    fn init(&mut self) -> Result<(), MockError> {
        self.calls.push(BusCall::Init);
        self.fail_with.map_or(Ok(()), Err)
    }

    fn deinit(&mut self) -> Result<(), MockError> {
        self.calls.push(BusCall::Deinit);
        self.fail_with.map_or(Ok(()), Err)
    }

    fn read(&mut self, address: u8, reg: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.read_regs(Some(address), reg, buf)
    }

    fn write(&mut self, address: u8, reg: u8, buf: &[u8]) -> Result<(), MockError> {
        self.write_regs(Some(address), reg, buf)
    }
}

impl SpiDriver for MockBus {
    type Error = MockError;

    fn init(&mut self, mode: SpiMode) -> Result<(), MockError> {
        self.calls.push(BusCall::InitMode(mode));
        self.fail_with.map_or(Ok(()), Err)
    }

    fn deinit(&mut self) -> Result<(), MockError> {
        self.calls.push(BusCall::Deinit);
        self.fail_with.map_or(Ok(()), Err)
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.read_regs(None, reg, buf)
    }

    fn write(&mut self, reg: u8, buf: &[u8]) -> Result<(), MockError> {
        self.write_regs(None, reg, buf)
    }
}

/// Text transport that keeps every transmitted chunk.
#[derive(Debug, Default)]
pub struct CaptureTransport {
    pub chunks: Vec<Vec<u8>>,
    pub fail: bool,
}

impl CaptureTransport {
    pub fn lines(&self) -> Vec<String> {
        self.chunks
            .iter()
            .map(|c| String::from_utf8(c.clone()).unwrap())
            .collect()
    }
}

impl OutputTransport for CaptureTransport {
    type Error = MockError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError(1));
        }
        self.chunks.push(bytes.to_vec());
        Ok(())
    }
}

/// Delay source that sums requested time instead of sleeping.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
