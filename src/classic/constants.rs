//! Wii Classic Controller protocol constants
//!
//! This module contains the constants needed to talk to the controller:
//! - Default bus address
//! - Handshake commands that switch the controller to unencrypted mode
//! - Register read command and frame size
//! - Timing constants

use std::time::Duration;

// ============================================================================
// Bus Constants
// ============================================================================

/// Default 7-bit I2C address of Wii extension controllers
pub const DEFAULT_ADDRESS: u16 = 0x52;

/// Size of the status register image in bytes
pub const FRAME_LEN: usize = 8;

// ============================================================================
// Commands
// ============================================================================

/// Disable encryption - Step 1
/// See http://wiibrew.org/wiki/Wiimote/Extension_Controllers
pub const INIT_DISABLE_ENCRYPTION: [u8; 2] = [0xF0, 0x55];

/// Disable encryption - Step 2
pub const INIT_FINALIZE: [u8; 2] = [0xFB, 0x00];

/// Register select byte written before every status read
pub const READ_REGISTER: [u8; 1] = [0x00];

// ============================================================================
// Timing Constants
// ============================================================================

/// Settle time after opening the device and between handshake commands
pub const INIT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Shortest pause the controller tolerates between register select and read
pub const MIN_READ_DELAY: Duration = Duration::from_micros(200);

/// Default pause between register select and read.
/// Conservative because some hosts cannot time 200us reliably.
pub const DEFAULT_READ_DELAY: Duration = Duration::from_micros(2000);

/// Number of open attempts before giving up
/// (NES/SNES Classic controllers boot slowly)
pub const DEFAULT_INIT_ATTEMPTS: u32 = 10;

/// Pause after each failed open attempt
pub const DEFAULT_INIT_RETRY_DELAY: Duration = Duration::from_secs(1);
