//! Test-only library interface for hr2ble.
//!
//! This crate root exposes the pure peripheral core - attribute table,
//! subscription state, connection lifecycle, sensor ingest, advertising
//! payloads - which can be tested on the host (no embedded hardware
//! required).
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! behind the `embedded` feature; it feeds SoftDevice and sensor-channel
//! events into the [`peripheral::Peripheral`] core defined here.

#![cfg_attr(not(test), no_std)]

pub mod adv;
pub mod config;
pub mod error;
pub mod gatt;
pub mod hrs;
pub mod peripheral;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
