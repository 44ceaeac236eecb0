//! Wii Classic Controller support
//!
//! This module provides the complete controller integration:
//! - Protocol constants and timing
//! - Frame decoding into typed value groups
//! - The polling driver with its initialization handshake

pub mod constants;
pub mod types;
pub mod frame;
pub mod driver;

// Re-export commonly used items
pub use constants::*;
pub use types::*;
pub use frame::Frame;
pub use driver::*;
