//! Heart Rate Measurement value.
//!
//! Wire layout (2 bytes, little-endian u16):
//! ```text
//! Byte 0: presentation flags (0x06 = uint8 heart-rate-value format)
//! Byte 1: latest raw sensor reading
//! ```
//! The value is a single overwritten slot, not a queue: if samples
//! arrive faster than notifications go out, intermediate readings are
//! coalesced and only the latest survives.

use crate::config::MEASUREMENT_FLAGS;

/// Current Heart Rate Measurement value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement(u16);

impl Measurement {
    /// Overwrite with a freshly ingested raw sample.
    pub fn update(&mut self, raw: u8) {
        self.0 = (raw as u16) << 8 | MEASUREMENT_FLAGS as u16;
    }

    /// Composite value: high byte raw reading, low byte flags.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Notification payload bytes (flags first on the wire).
    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}
