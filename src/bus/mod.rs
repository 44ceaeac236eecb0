//! Bus abstraction for I2C transports
//!
//! This module provides the transport interface the driver is written
//! against, so the same driver runs on a Linux `/dev/i2c-N` device or on
//! the recording mock used in tests.

pub mod mock_bus;
#[cfg(target_os = "linux")]
pub mod linux_i2cdev;

pub use mock_bus::{MockBus, MockDelay, MockDevice, MockEvent};
#[cfg(target_os = "linux")]
pub use linux_i2cdev::{LinuxI2cBus, LinuxI2cDevice};

use std::ops::{Deref, DerefMut};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bus transaction failed: {0}")]
    Transport(String),

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

/// An I2C bus that can open a device at a given address
pub trait I2cBus {
    /// Device session handed out by [`I2cBus::open`]
    type Device: I2cDevice;

    /// Open a session with the device at `address`.
    /// Fails if the device does not respond.
    fn open(&mut self, address: u16) -> Result<Self::Device, BusError>;
}

/// An opened device on the bus
pub trait I2cDevice {
    /// Take exclusive access to the bus (lock shared hardware, etc.)
    fn acquire(&mut self) -> Result<(), BusError> {
        Ok(())
    }

    /// Give up exclusive access. Called even if the transaction failed.
    fn release(&mut self) {}

    /// Write raw bytes to the device
    fn write(&mut self, data: &[u8]) -> Result<(), BusError>;

    /// Read exactly `buf.len()` bytes from the device
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError>;
}

/// Blocking sleep primitive
pub trait Delay {
    fn sleep(&mut self, duration: Duration);
}

/// [`Delay`] backed by `std::thread::sleep`
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Scoped exclusive access to a device.
///
/// Acquired on [`Session::begin`], released on drop (including early
/// returns through `?`).
pub struct Session<'a, D: I2cDevice> {
    device: &'a mut D,
}

impl<'a, D: I2cDevice> Session<'a, D> {
    /// Acquire the device for one transaction
    pub fn begin(device: &'a mut D) -> Result<Self, BusError> {
        device.acquire()?;
        Ok(Self { device })
    }
}

impl<D: I2cDevice> Deref for Session<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.device
    }
}

impl<D: I2cDevice> DerefMut for Session<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.device
    }
}

impl<D: I2cDevice> Drop for Session<'_, D> {
    fn drop(&mut self) {
        self.device.release();
    }
}
