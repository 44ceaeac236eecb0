//! Linux I2C backend using `/dev/i2c-N` character devices.
//!
//! Requires the `i2c-dev` kernel module. On a Raspberry Pi the header pins
//! 3/5 are `/dev/i2c-1`.

use crate::bus::{BusError, I2cBus, I2cDevice};
use i2cdev::core::I2CDevice as _;
use i2cdev::linux::LinuxI2CDevice;
use log::debug;
use std::path::{Path, PathBuf};

/// A Linux I2C adapter identified by its device node
#[derive(Debug, Clone)]
pub struct LinuxI2cBus {
    path: PathBuf,
}

impl LinuxI2cBus {
    /// Use the adapter at `path` (e.g. `/dev/i2c-1`)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Device node path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl I2cBus for LinuxI2cBus {
    type Device = LinuxI2cDevice;

    fn open(&mut self, address: u16) -> Result<LinuxI2cDevice, BusError> {
        let mut device = LinuxI2CDevice::new(&self.path, address)
            .map_err(|e| BusError::Transport(format!("{}: {}", self.path.display(), e)))?;

        // Binding the slave address always succeeds, so probe for an ACK
        let mut probe = [0u8; 1];
        device.read(&mut probe).map_err(|e| {
            BusError::Transport(format!("no response at 0x{:02X}: {}", address, e))
        })?;

        debug!("Opened {} at 0x{:02X}", self.path.display(), address);
        Ok(LinuxI2cDevice { inner: device })
    }
}

/// An opened device on a Linux I2C adapter.
///
/// The kernel serializes transfers on the adapter, so acquire/release are
/// the trait's no-op defaults.
pub struct LinuxI2cDevice {
    inner: LinuxI2CDevice,
}

impl I2cDevice for LinuxI2cDevice {
    fn write(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.inner
            .write(data)
            .map_err(|e| BusError::Transport(e.to_string()))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        self.inner
            .read(buf)
            .map_err(|e| BusError::Transport(e.to_string()))
    }
}
