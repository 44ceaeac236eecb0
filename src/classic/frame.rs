//! Status frame decoding
//!
//! The controller answers a read of register 0x00 with an 8-byte image:
//!
//! ```text
//! byte 0: RX[4:3] LX[5:0]
//! byte 1: RX[2:1] LY[5:0]
//! byte 2: RX[0]   LT[4:3] RY[4:0]
//! byte 3: LT[2:0] RT[4:0]
//! byte 4: BDR BDD BLT B-  BH  B+  BRT 1
//! byte 5: BZL BB  BY  BA  BX  BZR BDL BDU
//! ```
//!
//! Button bits are active-low: a cleared bit means pressed.
//! Decoding is pure and never touches the bus.

use crate::classic::constants::FRAME_LEN;
use crate::classic::types::{
    Buttons, ControllerState, DPad, JoystickLeft, JoystickRight, ShoulderLeftAnalog,
    ShoulderRightAnalog,
};

/// Raw status register image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Wrap raw register bytes
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw register bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.0
    }

    /// Decode every value group from this frame
    pub fn decode(&self) -> ControllerState {
        ControllerState {
            joystick_l: self.joystick_l(),
            joystick_r: self.joystick_r(),
            l_shoulder: self.l_shoulder(),
            r_shoulder: self.r_shoulder(),
            d_pad: self.d_pad(),
            buttons: self.buttons(),
        }
    }

    /// Decode the left stick (bytes 0-1)
    pub fn joystick_l(&self) -> JoystickLeft {
        let buf = &self.0;
        JoystickLeft {
            x: buf[0] & 0x3F,
            y: buf[1] & 0x3F,
        }
    }

    /// Decode the right stick (bytes 0-2)
    pub fn joystick_r(&self) -> JoystickRight {
        let buf = &self.0;
        JoystickRight {
            // (buf[2] & 0x40) >> 7 is always 0, so RX[0] never shows up
            x: ((buf[0] & 0xC0) >> 3) | ((buf[1] & 0xC0) >> 5) | ((buf[2] & 0x40) >> 7),
            y: buf[2] & 0x1F,
        }
    }

    /// Decode the left trigger pressure (bytes 2-3)
    pub fn l_shoulder(&self) -> ShoulderLeftAnalog {
        let buf = &self.0;
        ShoulderLeftAnalog {
            force: ((buf[2] & 0x60) >> 2) | ((buf[3] & 0xE0) >> 5),
        }
    }

    /// Decode the right trigger pressure (byte 3)
    pub fn r_shoulder(&self) -> ShoulderRightAnalog {
        ShoulderRightAnalog {
            force: self.0[3] & 0x1C,
        }
    }

    /// Decode the directional pad (bytes 4-5)
    pub fn d_pad(&self) -> DPad {
        let buf = &self.0;
        DPad {
            up: pressed(buf[5], 0x01),
            down: pressed(buf[4], 0x40),
            left: pressed(buf[5], 0x02),
            right: pressed(buf[4], 0x80),
        }
    }

    /// Decode the digital buttons (bytes 4-5)
    pub fn buttons(&self) -> Buttons {
        let buf = &self.0;
        Buttons {
            a: pressed(buf[5], 0x10),
            b: pressed(buf[5], 0x40),
            start: pressed(buf[4], 0x04),
            select: pressed(buf[4], 0x10),
            x: pressed(buf[5], 0x08),
            y: pressed(buf[5], 0x20),
            home: pressed(buf[4], 0x08),
            zl: pressed(buf[5], 0x80),
            zr: pressed(buf[5], 0x04),
            l: pressed(buf[4], 0x20),
            r: pressed(buf[4], 0x02),
        }
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }
}

/// Active-low bit test
#[inline]
fn pressed(byte: u8, mask: u8) -> bool {
    byte & mask == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sticks centered-ish, nothing pressed
    const IDLE: [u8; 8] = [0x3F, 0x3F, 0xDF, 0xFF, 0xFF, 0xFF, 0x00, 0x00];

    #[test]
    fn test_idle_frame() {
        let state = Frame::from_bytes(IDLE).decode();

        assert_eq!(state.joystick_l, JoystickLeft { x: 0x3F, y: 0x3F });
        assert_eq!(state.joystick_r.y, 0x1F);
        assert_eq!(state.buttons, Buttons::default());
        assert_eq!(state.d_pad, DPad::default());
        assert!(!state.buttons.any_pressed());
        assert!(!state.d_pad.any_pressed());
    }

    #[test]
    fn test_joystick_l_masks_every_byte_value() {
        for value in 0..=u8::MAX {
            let frame = Frame::from_bytes([value, value.wrapping_add(17), 0, 0, 0xFF, 0xFF, 0, 0]);
            let stick = frame.joystick_l();
            assert_eq!(stick.x, value & 0x3F);
            assert_eq!(stick.y, value.wrapping_add(17) & 0x3F);
            assert!(stick.x <= 63 && stick.y <= 63);
        }
    }

    #[test]
    fn test_joystick_r_bit_layout() {
        // RX[4:3] from byte 0
        let frame = Frame::from_bytes([0xC0, 0x00, 0x00, 0, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.joystick_r().x, 0x18);

        // RX[2:1] from byte 1
        let frame = Frame::from_bytes([0x00, 0xC0, 0x00, 0, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.joystick_r().x, 0x06);

        // Byte 2 bit 6 does not reach x
        let frame = Frame::from_bytes([0x00, 0x00, 0x40, 0, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.joystick_r().x, 0);

        let frame = Frame::from_bytes([0xFF, 0xFF, 0xFF, 0, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.joystick_r(), JoystickRight { x: 0x1E, y: 0x1F });
    }

    #[test]
    fn test_shoulders() {
        // LT[4:3] = 0b11, LT[2:0] = 0b111
        let frame = Frame::from_bytes([0, 0, 0x60, 0xE0, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.l_shoulder().force, 31);
        assert_eq!(frame.r_shoulder().force, 0);

        let frame = Frame::from_bytes([0, 0, 0x20, 0x20, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.l_shoulder().force, 0b01001);

        // Right trigger keeps the masked bits unshifted
        let frame = Frame::from_bytes([0, 0, 0, 0x1F, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.r_shoulder().force, 0x1C);

        let frame = Frame::from_bytes([0, 0, 0, 0x04, 0xFF, 0xFF, 0, 0]);
        assert_eq!(frame.r_shoulder().force, 0x04);
    }

    #[test]
    fn test_single_button_clear_bits() {
        // (byte index, mask, expected state with only that bit cleared)
        let cases: [(usize, u8, fn(&ControllerState) -> bool); 15] = [
            (5, 0x10, |s| s.buttons.a),
            (5, 0x40, |s| s.buttons.b),
            (4, 0x04, |s| s.buttons.start),
            (4, 0x10, |s| s.buttons.select),
            (5, 0x08, |s| s.buttons.x),
            (5, 0x20, |s| s.buttons.y),
            (4, 0x08, |s| s.buttons.home),
            (5, 0x80, |s| s.buttons.zl),
            (5, 0x04, |s| s.buttons.zr),
            (4, 0x20, |s| s.buttons.l),
            (4, 0x02, |s| s.buttons.r),
            (5, 0x01, |s| s.d_pad.up),
            (4, 0x40, |s| s.d_pad.down),
            (5, 0x02, |s| s.d_pad.left),
            (4, 0x80, |s| s.d_pad.right),
        ];

        for (index, mask, field) in cases {
            let mut bytes = IDLE;
            bytes[index] &= !mask;
            let state = Frame::from_bytes(bytes).decode();

            assert!(field(&state), "byte {} mask 0x{:02X} should read pressed", index, mask);

            // Exactly one input reads as held
            let mut held = 0;
            for (_, _, other) in cases {
                if other(&state) {
                    held += 1;
                }
            }
            assert_eq!(held, 1, "byte {} mask 0x{:02X}", index, mask);
        }
    }

    #[test]
    fn test_active_low_inversion_for_all_bytes() {
        for b4 in 0..=u8::MAX {
            let b5 = b4.rotate_left(3);
            let frame = Frame::from_bytes([0, 0, 0, 0, b4, b5, 0, 0]);
            let buttons = frame.buttons();
            let d_pad = frame.d_pad();

            assert_eq!(buttons.a, b5 & 0x10 == 0);
            assert_eq!(buttons.b, b5 & 0x40 == 0);
            assert_eq!(buttons.start, b4 & 0x04 == 0);
            assert_eq!(buttons.select, b4 & 0x10 == 0);
            assert_eq!(buttons.x, b5 & 0x08 == 0);
            assert_eq!(buttons.y, b5 & 0x20 == 0);
            assert_eq!(buttons.home, b4 & 0x08 == 0);
            assert_eq!(buttons.zl, b5 & 0x80 == 0);
            assert_eq!(buttons.zr, b5 & 0x04 == 0);
            assert_eq!(buttons.l, b4 & 0x20 == 0);
            assert_eq!(buttons.r, b4 & 0x02 == 0);
            assert_eq!(d_pad.up, b5 & 0x01 == 0);
            assert_eq!(d_pad.down, b4 & 0x40 == 0);
            assert_eq!(d_pad.left, b5 & 0x02 == 0);
            assert_eq!(d_pad.right, b4 & 0x80 == 0);
        }
    }

    #[test]
    fn test_all_pressed() {
        let state = Frame::from_bytes([0; 8]).decode();
        assert!(state.buttons.any_pressed());
        assert!(state.d_pad.any_pressed());
        assert!(state.buttons.a && state.buttons.zr && state.buttons.home);
    }

    #[test]
    fn test_bytes_6_and_7_ignored() {
        let mut other = IDLE;
        other[6] = 0xAA;
        other[7] = 0x55;
        assert_eq!(Frame::from(IDLE).decode(), Frame::from(other).decode());
    }
}
