//! Wii Classic Controller type definitions
//!
//! This module defines the decoded value groups read from the controller.
//! Every group is a plain `Copy` snapshot with no link back to the frame
//! buffer it was decoded from.

use serde::{Deserialize, Serialize};

/// Left analog stick (6-bit axes, 0 to 63)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoystickLeft {
    /// Horizontal axis
    pub x: u8,

    /// Vertical axis
    pub y: u8,
}

/// Right analog stick (5-bit axes, 0 to 31)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoystickRight {
    /// Horizontal axis
    pub x: u8,

    /// Vertical axis
    pub y: u8,
}

/// Left shoulder trigger pressure (5-bit, 0 to 31)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoulderLeftAnalog {
    pub force: u8,
}

/// Right shoulder trigger pressure.
///
/// Holds the masked register bits as-is (`byte3 & 0x1C`), so only multiples
/// of 4 up to 28 occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoulderRightAnalog {
    pub force: u8,
}

/// Directional pad (true = pressed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DPad {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DPad {
    /// Whether any direction is held
    pub fn any_pressed(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Digital button states (true = pressed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    // Face buttons
    pub a: bool,
    pub b: bool,

    // System buttons
    pub start: bool,
    pub select: bool,

    pub x: bool,
    pub y: bool,
    pub home: bool,

    // Shoulder buttons
    pub zl: bool,
    pub zr: bool,
    pub l: bool,
    pub r: bool,
}

impl Buttons {
    /// Whether any button is held
    pub fn any_pressed(&self) -> bool {
        self.a
            || self.b
            || self.start
            || self.select
            || self.x
            || self.y
            || self.home
            || self.zl
            || self.zr
            || self.l
            || self.r
    }
}

/// Complete controller snapshot decoded from a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    pub joystick_l: JoystickLeft,
    pub joystick_r: JoystickRight,
    pub l_shoulder: ShoulderLeftAnalog,
    pub r_shoulder: ShoulderRightAnalog,
    pub d_pad: DPad,
    pub buttons: Buttons,
}
