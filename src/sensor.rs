//! Inbound sensor channel.
//!
//! Raw readings arrive from an independent execution context (the sensor
//! core's transport driver, running at interrupt priority). The driver is
//! out of scope here; its contract is [`submit_sample`], which enqueues
//! into a bounded inbox drained by the BLE event loop. Enqueueing never
//! blocks: on overflow the sample is dropped, consistent with
//! latest-value-wins delivery.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use hr2ble::config::SENSOR_INBOX_DEPTH;

/// One raw reading from the shared transport.
#[derive(Clone, Copy, defmt::Format)]
pub struct SensorMessage {
    /// Multiplexed channel id; only the heart-rate id is acted on.
    pub channel_id: u32,
    /// Raw sensor byte.
    pub value: u8,
}

/// Inbox between the transport driver and the BLE event loop.
pub static SENSOR_INBOX: Channel<CriticalSectionRawMutex, SensorMessage, SENSOR_INBOX_DEPTH> =
    Channel::new();

/// Entry point for the transport driver, safe to call from interrupt
/// context. Fire and forget.
pub fn submit_sample(channel_id: u32, value: u8) {
    let _ = SENSOR_INBOX.try_send(SensorMessage { channel_id, value });
}
