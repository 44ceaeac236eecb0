//! wii-classic: Nintendo Wii Classic Controller driver
//!
//! This library talks to a Wii Classic Controller over I2C: it runs the
//! unencrypted-mode handshake, polls the 8-byte status register and decodes
//! it into sticks, analog triggers, d-pad and buttons.

pub mod bus;
pub mod classic;
pub mod config;

// Re-export commonly used items
pub use bus::{BusError, Delay, I2cBus, I2cDevice, StdDelay};
pub use classic::{
    Buttons, ControllerState, DPad, DriverState, Frame, InitError, JoystickLeft, JoystickRight,
    ShoulderLeftAnalog, ShoulderRightAnalog, WiiClassic,
};
pub use config::{Config, ConfigError, DriverConfig};
