//! Application-wide constants and compile-time configuration.
//!
//! All protocol constants, identity values, and timing parameters live
//! here so they can be tuned in one place.

// Identity

/// Complete local device name, advertised in the scan response and
/// served by the GAP device-name characteristic.
pub const DEVICE_NAME: &str = "Heartrate Monitor";

/// GAP appearance code: Generic Heart Rate Sensor (0x0341).
/// Served little-endian by the appearance read handler.
pub const APPEARANCE: u16 = 0x0341;

// Sensor channel

/// Identifier of the inbound sensor channel carrying heart-rate samples.
/// The transport is shared; samples on any other id are ignored.
pub const HRS_CHANNEL_ID: u32 = 99;

/// Heart Rate Measurement presentation flags: uint8 heart-rate-value
/// format, no optional fields. Low byte of every measurement value.
pub const MEASUREMENT_FLAGS: u8 = 0x06;

/// Depth of the inbound sample inbox. Overflow drops the oldest intent,
/// consistent with latest-value-wins delivery.
pub const SENSOR_INBOX_DEPTH: usize = 8;

// Subscription state

/// Size of the per-client subscription table. Mirrors the maximum
/// paired-client configuration of the host stack.
pub const MAX_PAIRED_CLIENTS: usize = 4;

// BLE

/// Advertising interval (0.625 ms units). 400 = 250 ms.
pub const BLE_ADV_INTERVAL: u32 = 400;

/// BLE connection interval range (in 1.25 ms units).
/// 24 = 30 ms, a comfortable rate for one-value-per-beat traffic.
pub const BLE_CONN_INTERVAL_MIN: u16 = 24;
pub const BLE_CONN_INTERVAL_MAX: u16 = 40;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;
