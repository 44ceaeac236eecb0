//! Mock I2C bus for testing.
//!
//! This transport records every bus operation and sleep instead of touching
//! hardware. Useful for exercising the driver handshake and decoding
//! without a controller attached. Clones share the same recording, so a
//! test can keep a handle while the driver owns the device.

use crate::bus::{BusError, Delay, I2cBus, I2cDevice};
use crate::classic::constants::FRAME_LEN;
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One recorded operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    Open { address: u16, ok: bool },
    Acquire,
    Release,
    Write { data: Vec<u8>, ok: bool },
    Read { len: usize, ok: bool },
    Sleep(Duration),
}

#[derive(Debug, Default)]
struct MockState {
    events: Vec<MockEvent>,
    frame: [u8; FRAME_LEN],
    open_failures: u32,
    write_failures: u32,
    read_failures: u32,
}

/// Mock bus that records operations instead of performing them.
#[derive(Clone, Debug, Default)]
pub struct MockBus {
    state: Arc<Mutex<MockState>>,
}

impl MockBus {
    /// Create a new mock bus with an all-zero register image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` open attempts fail.
    pub fn with_open_failures(self, count: u32) -> Self {
        self.lock().open_failures = count;
        self
    }

    /// Set the register image returned by subsequent reads.
    pub fn set_frame(&self, frame: [u8; FRAME_LEN]) {
        self.lock().frame = frame;
    }

    /// Make the next `count` writes fail.
    pub fn fail_writes(&self, count: u32) {
        self.lock().write_failures = count;
    }

    /// Make the next `count` reads fail.
    pub fn fail_reads(&self, count: u32) {
        self.lock().read_failures = count;
    }

    /// A delay that records into this bus's event log.
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            state: Arc::clone(&self.state),
        }
    }

    /// Every recorded operation, oldest first.
    pub fn events(&self) -> Vec<MockEvent> {
        self.lock().events.clone()
    }

    /// Payloads of the successful writes, oldest first.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                MockEvent::Write { data, ok: true } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of read transactions attempted.
    pub fn read_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|event| matches!(event, MockEvent::Read { .. }))
            .count()
    }

    /// Number of open attempts.
    pub fn open_count(&self) -> usize {
        self.lock()
            .events
            .iter()
            .filter(|event| matches!(event, MockEvent::Open { .. }))
            .count()
    }

    /// Forget recorded operations (failure counters and frame stay).
    pub fn clear_events(&self) {
        self.lock().events.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }
}

impl I2cBus for MockBus {
    type Device = MockDevice;

    fn open(&mut self, address: u16) -> Result<MockDevice, BusError> {
        let mut state = self.lock();
        let ok = state.open_failures == 0;
        state.events.push(MockEvent::Open { address, ok });

        if !ok {
            state.open_failures -= 1;
            debug!("[MOCK BUS] Open 0x{:02X}: no response", address);
            return Err(BusError::Transport(format!(
                "no device at address 0x{:02X}",
                address
            )));
        }

        debug!("[MOCK BUS] Open 0x{:02X}", address);
        Ok(MockDevice {
            state: Arc::clone(&self.state),
        })
    }
}

/// Device session handed out by [`MockBus`].
#[derive(Debug)]
pub struct MockDevice {
    state: Arc<Mutex<MockState>>,
}

impl I2cDevice for MockDevice {
    fn acquire(&mut self) -> Result<(), BusError> {
        lock(&self.state).events.push(MockEvent::Acquire);
        Ok(())
    }

    fn release(&mut self) {
        lock(&self.state).events.push(MockEvent::Release);
    }

    fn write(&mut self, data: &[u8]) -> Result<(), BusError> {
        let mut state = lock(&self.state);
        let ok = state.write_failures == 0;
        state.events.push(MockEvent::Write {
            data: data.to_vec(),
            ok,
        });

        if !ok {
            state.write_failures -= 1;
            return Err(BusError::Transport("write not acknowledged".to_string()));
        }

        debug!("[MOCK BUS] Write: {:02X?}", data);
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        let mut state = lock(&self.state);
        let ok = state.read_failures == 0;
        state.events.push(MockEvent::Read { len: buf.len(), ok });

        if !ok {
            state.read_failures -= 1;
            return Err(BusError::Transport("read not acknowledged".to_string()));
        }
        if buf.len() > FRAME_LEN {
            return Err(BusError::ShortRead {
                expected: buf.len(),
                actual: FRAME_LEN,
            });
        }

        buf.copy_from_slice(&state.frame[..buf.len()]);
        debug!("[MOCK BUS] Read: {:02X?}", buf);
        Ok(())
    }
}

/// Delay that records sleeps instead of blocking.
#[derive(Clone, Debug)]
pub struct MockDelay {
    state: Arc<Mutex<MockState>>,
}

impl MockDelay {
    /// A standalone delay not attached to any bus.
    pub fn new() -> Self {
        Self {
            state: Arc::default(),
        }
    }

    /// Total time slept so far.
    pub fn total(&self) -> Duration {
        lock(&self.state)
            .events
            .iter()
            .filter_map(|event| match event {
                MockEvent::Sleep(duration) => Some(*duration),
                _ => None,
            })
            .sum()
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for MockDelay {
    fn sleep(&mut self, duration: Duration) {
        lock(&self.state).events.push(MockEvent::Sleep(duration));
    }
}

// A panicking test thread must not hide the log from the others
fn lock(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
