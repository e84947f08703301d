//! Integration tests for the hr2ble peripheral core.
//!
//! Drives the full lifecycle the way the embedded event loop does:
//! host ready -> register -> advertise -> connect -> ingest -> notify.

use hr2ble::config::{HRS_CHANNEL_ID, MEASUREMENT_FLAGS};
use hr2ble::gatt::ccc::CCC_NOTIFY;
use hr2ble::peripheral::{Peripheral, SetupState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Conn(u8);

#[test]
fn full_lifecycle_scenario() {
    let mut p: Peripheral<Conn> = Peripheral::new();

    // Boot: host ready, attribute table registered, advertising up.
    p.on_host_ready(true).expect("host ready");
    p.mark_registered().expect("register once");
    p.advertising_started(true).expect("advertising");

    // Central connects and subscribes.
    p.on_connected(Conn(1), 0).expect("clean connect");
    p.on_ccc_changed(0, CCC_NOTIFY);
    assert!(p.is_subscribed(0));

    // A sample on the heart-rate channel becomes a notification.
    let n = p.on_sample(HRS_CHANNEL_ID, 0x4B).expect("notification effect");
    assert_eq!(n.conn, Conn(1));
    assert_eq!(n.value, 0x4B06);
    assert_eq!(n.payload(), [MEASUREMENT_FLAGS, 0x4B]);

    // Central goes away: handle cleared, next sample is stored but not
    // delivered.
    p.on_disconnected(0x13);
    assert_eq!(p.state(), SetupState::Advertising);
    assert!(p.on_sample(HRS_CHANNEL_ID, 0x50).is_none());
    assert_eq!(p.measurement(), 0x5006);

    // New central: the stale subscription is gone, delivery resumes.
    p.on_connected(Conn(2), 0).expect("reconnect");
    assert!(!p.is_subscribed(0));
    let n = p.on_sample(HRS_CHANNEL_ID, 0x52).expect("notification effect");
    assert_eq!(n.conn, Conn(2));
    assert_eq!(n.value, 0x5206);
}

#[test]
fn sensor_burst_coalesces_to_latest_value() {
    let mut p: Peripheral<Conn> = Peripheral::new();
    p.on_host_ready(true).unwrap();
    p.mark_registered().unwrap();
    p.advertising_started(true).unwrap();
    p.on_connected(Conn(9), 0).unwrap();

    // Every accepted sample yields a fresh effect carrying the value at
    // ingest time; the stored value always tracks the last one.
    let mut last = None;
    for b in [60, 61, 63, 70, 72] {
        last = p.on_sample(HRS_CHANNEL_ID, b);
    }
    assert_eq!(last.unwrap().value, 72 << 8 | MEASUREMENT_FLAGS as u16);
    assert_eq!(p.measurement(), 72 << 8 | MEASUREMENT_FLAGS as u16);
}

#[test]
fn failed_boot_never_reaches_advertising() {
    let mut p: Peripheral<Conn> = Peripheral::new();
    assert!(p.on_host_ready(false).is_err());
    assert_eq!(p.state(), SetupState::Failed);
    assert!(p.mark_registered().is_err());
    assert!(p.on_sample(HRS_CHANNEL_ID, 0x40).is_none());
    assert_eq!(p.measurement(), 0x4006); // stored even while failed
}
