//! Wii Classic Controller driver
//!
//! This module handles the bus side of the controller: opening the device
//! (with retries for slow-booting controllers), the handshake that turns
//! off encryption, and polling the status register.

use crate::bus::{BusError, Delay, I2cBus, I2cDevice, Session};
use crate::classic::constants::*;
use crate::classic::frame::Frame;
use crate::classic::types::{
    Buttons, ControllerState, DPad, JoystickLeft, JoystickRight, ShoulderLeftAnalog,
    ShoulderRightAnalog,
};
use crate::config::{ConfigError, DriverConfig};
use log::{debug, info, warn};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("No controller at address 0x{address:02X} after {attempts} attempts: {source}")]
    DeviceNotFound {
        address: u16,
        attempts: u32,
        #[source]
        source: BusError,
    },

    #[error("Initialization handshake failed: {0}")]
    Handshake(#[from] BusError),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Ready,
}

/// Wii Classic Controller on an I2C bus.
///
/// A value of this type only exists once the handshake succeeded, so every
/// instance is [`DriverState::Ready`]. Bus errors while polling are handed
/// to the caller and leave the driver usable.
pub struct WiiClassic<D, T>
where
    D: I2cDevice,
    T: Delay,
{
    device: D,
    delay: T,
    config: DriverConfig,
    frame: Frame,
    state: DriverState,
}

impl<D, T> WiiClassic<D, T>
where
    D: I2cDevice,
    T: Delay,
{
    /// Initialize with the default address and timing
    pub fn new<B>(bus: &mut B, delay: T) -> Result<Self, InitError>
    where
        B: I2cBus<Device = D>,
    {
        Self::from_config(bus, delay, DriverConfig::default())
    }

    /// Initialize the controller at `address`.
    ///
    /// `read_delay` is the pause between register select and read; it must
    /// be at least 200us.
    pub fn initialize<B>(
        bus: &mut B,
        delay: T,
        address: u16,
        read_delay: Duration,
    ) -> Result<Self, InitError>
    where
        B: I2cBus<Device = D>,
    {
        let config = DriverConfig {
            address,
            read_delay,
            ..DriverConfig::default()
        };
        Self::from_config(bus, delay, config)
    }

    /// Initialize with explicit settings
    pub fn from_config<B>(bus: &mut B, mut delay: T, config: DriverConfig) -> Result<Self, InitError>
    where
        B: I2cBus<Device = D>,
    {
        config.validate()?;

        let mut state = DriverState::Uninitialized;
        debug!("Driver state: {:?}", state);

        info!("Connecting to controller at 0x{:02X}...", config.address);
        let mut device = open_with_retry(bus, &mut delay, &config)?;
        info!("✓ Controller found!");

        send_initialization_commands(&mut device, &mut delay)?;

        state = DriverState::Ready;
        debug!("Driver state: {:?}", state);

        Ok(Self {
            device,
            delay,
            config,
            frame: Frame::default(),
            state,
        })
    }

    /// Poll the status register into the frame buffer.
    ///
    /// The same buffer is reused on every call; copy the frame to keep it.
    /// After an error the buffer may hold a partial read.
    pub fn read_frame(&mut self) -> Result<&Frame, BusError> {
        {
            let mut session = Session::begin(&mut self.device)?;
            session.write(&READ_REGISTER)?;
            self.delay.sleep(self.config.read_delay);
            session.read_into(self.frame.as_mut_bytes())?;
        }

        debug!("Frame: {:02X?}", self.frame.as_bytes());
        Ok(&self.frame)
    }

    /// Frame from the most recent read, without touching the bus
    pub fn last_frame(&self) -> &Frame {
        &self.frame
    }

    /// Read all value groups from a single frame
    pub fn values(&mut self) -> Result<ControllerState, BusError> {
        Ok(self.read_frame()?.decode())
    }

    /// Read the left stick position
    pub fn joystick_l(&mut self) -> Result<JoystickLeft, BusError> {
        Ok(self.read_frame()?.joystick_l())
    }

    /// Read the right stick position
    pub fn joystick_r(&mut self) -> Result<JoystickRight, BusError> {
        Ok(self.read_frame()?.joystick_r())
    }

    /// Read the left trigger pressure
    pub fn l_shoulder(&mut self) -> Result<ShoulderLeftAnalog, BusError> {
        Ok(self.read_frame()?.l_shoulder())
    }

    /// Read the right trigger pressure
    pub fn r_shoulder(&mut self) -> Result<ShoulderRightAnalog, BusError> {
        Ok(self.read_frame()?.r_shoulder())
    }

    /// Read the directional pad
    pub fn d_pad(&mut self) -> Result<DPad, BusError> {
        Ok(self.read_frame()?.d_pad())
    }

    /// Read the digital buttons
    pub fn buttons(&mut self) -> Result<Buttons, BusError> {
        Ok(self.read_frame()?.buttons())
    }

    /// Get driver state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Device address
    pub fn address(&self) -> u16 {
        self.config.address
    }

    /// Pause between register select and read
    pub fn read_delay(&self) -> Duration {
        self.config.read_delay
    }

    /// Settings this driver was initialized with
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Close the driver and hand back the device session
    pub fn release(self) -> D {
        info!("Releasing controller at 0x{:02X}", self.config.address);
        self.device
    }
}

/// Open the device, retrying while it does not respond
fn open_with_retry<B, T>(bus: &mut B, delay: &mut T, config: &DriverConfig) -> Result<B::Device, InitError>
where
    B: I2cBus,
    T: Delay,
{
    let mut attempt = 1;
    loop {
        match bus.open(config.address) {
            Ok(device) => {
                debug!("Opened device on attempt {}", attempt);
                return Ok(device);
            }
            Err(e) if attempt < config.init_attempts => {
                warn!(
                    "Open attempt {}/{} failed: {}",
                    attempt, config.init_attempts, e
                );
                delay.sleep(config.init_retry_delay);
                attempt += 1;
            }
            Err(e) => {
                return Err(InitError::DeviceNotFound {
                    address: config.address,
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }
}

/// Switch the controller to unencrypted reports
fn send_initialization_commands<D, T>(device: &mut D, delay: &mut T) -> Result<(), BusError>
where
    D: I2cDevice,
    T: Delay,
{
    delay.sleep(INIT_SETTLE_DELAY);

    let mut session = Session::begin(device)?;

    debug!("  Disabling encryption...");
    session.write(&INIT_DISABLE_ENCRYPTION)?;
    delay.sleep(INIT_SETTLE_DELAY);

    debug!("  Finalizing...");
    session.write(&INIT_FINALIZE)?;

    Ok(())
}
