//! Embedded entry point: BLE heart-rate peripheral on nRF52840.
//!
//! Boot order matters: Embassy first (with interrupt priorities the
//! SoftDevice tolerates), then the SoftDevice, then the GATT server
//! registration, then the tasks. The sensor transport driver delivers
//! readings through `sensor::submit_sample` from its own context; this
//! context only idles once everything is spawned.

#![no_std]
#![no_main]

use defmt_rtt as _; // global logger
use panic_probe as _;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::interrupt;
use embassy_time::Timer;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

mod ble;
mod sensor;

use ble::Server;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("hr2ble starting");

    // The SoftDevice owns the highest interrupt priorities; keep Embassy
    // below them or it faults at the first radio event.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = interrupt::Priority::P2;
    nrf_config.time_interrupt_priority = interrupt::Priority::P2;
    let _p = embassy_nrf::init(nrf_config);

    let sd = Softdevice::enable(&ble::softdevice_config());
    info!("host stack ready");

    // Attribute table registration, exactly once. Failure is fatal for
    // this boot cycle.
    static SERVER: StaticCell<Server> = StaticCell::new();
    let server = SERVER.init(unwrap!(Server::new(sd)));

    unwrap!(spawner.spawn(ble::softdevice_task(sd)));
    unwrap!(spawner.spawn(ble::ble_task(sd, server)));

    // The transport driver feeds sensor::SENSOR_INBOX from interrupt
    // context; nothing left to do here.
    loop {
        Timer::after_secs(60).await;
    }
}
