//! Bluetooth Low Energy subsystem.
//!
//! Drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Advertising** - undirected connectable advertising with the fixed
//!    Heart Rate payload, restarted explicitly after every disconnect.
//! 2. **GATT server** - the SoftDevice-side registration of the Heart
//!    Rate service; CCC writes are forwarded to the peripheral core.
//! 3. **Event loop** - one task owning the [`Peripheral`] core, merging
//!    GATT events and sensor samples and issuing best-effort
//!    notifications.
//!
//! Communication with the sensor transport is done via the inbox in
//! `crate::sensor`.

use core::mem;
use core::pin::pin;

use defmt::{error, info, unwrap, warn};
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use nrf_softdevice::ble::gatt_server;
use nrf_softdevice::ble::peripheral;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, SecurityMode};
use nrf_softdevice::{raw, Softdevice};

use hr2ble::adv;
use hr2ble::config;
use hr2ble::gatt::ccc::CCC_NOTIFY;
use hr2ble::peripheral::Peripheral;

use crate::sensor::{SensorMessage, SENSOR_INBOX};

/// SoftDevice-side declaration of the Heart Rate service; the wire
/// counterpart of `hr2ble::gatt::attrs::HRS_ATTRS`. Notify-only: the
/// SoftDevice rejects reads on the measurement value with its standard
/// "read not permitted" error.
#[nrf_softdevice::gatt_service(uuid = "180d")]
pub struct HeartRateService {
    #[characteristic(uuid = "2a37", notify)]
    heart_rate_measurement: u16,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub hrs: HeartRateService,
}

/// CCC writes hop from the GATT callback into the event loop through
/// this channel, so the loop stays the sole owner of peripheral state.
static CCC_EVENTS: Channel<CriticalSectionRawMutex, bool, 4> = Channel::new();

/// SoftDevice configuration for a single peripheral link.
///
/// The GAP device name lives in constant flash (`VLOC_STACK` would copy
/// it into SoftDevice RAM; `VLOC_USER` serves it from our pointer).
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_XTAL as u8,
            rc_ctiv: 0,
            rc_temp_ctiv: 0,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_50_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 23 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::DEVICE_NAME.as_ptr() as *const u8 as *mut u8,
            current_len: config::DEVICE_NAME.len() as u16,
            max_len: config::DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_USER as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Publish the GAP appearance (Generic Heart Rate Sensor) so centrals
/// reading 0x2A01 get 0x0341 little-endian.
pub fn set_appearance() {
    let ret = unsafe { raw::sd_ble_gap_appearance_set(config::APPEARANCE) };
    if ret != raw::NRF_SUCCESS {
        warn!("sd_ble_gap_appearance_set: {}", ret);
    }
}

/// Observes pairing outcomes. Purely observational per the pairing
/// contract: log the peer, mutate nothing.
struct PairingWatcher;

impl SecurityHandler for PairingWatcher {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        false
    }

    fn on_security_update(&self, conn: &Connection, mode: SecurityMode) {
        match mode {
            // Pairing ended without raising the link above plaintext.
            SecurityMode::NoAccess | SecurityMode::Open => {
                info!("pairing cancelled: {}", conn.peer_address());
            }
            _ => info!("security mode {} with {}", mode, conn.peer_address()),
        }
    }
}

static PAIRING_WATCHER: PairingWatcher = PairingWatcher;

#[embassy_executor::task]
pub async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// The single-threaded event loop owning all peripheral state.
///
/// `Softdevice::enable` and `Server::new` both succeeded before this task
/// is spawned, which is the host-ready / registered-once part of setup.
#[embassy_executor::task]
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let mut state: Peripheral<Connection> = Peripheral::new();
    unwrap!(state.on_host_ready(true));
    unwrap!(state.mark_registered());
    set_appearance();

    let scan_data = adv::scan_data();

    loop {
        let adv_config = peripheral::Config {
            interval: config::BLE_ADV_INTERVAL,
            ..Default::default()
        };
        let advertisement = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &adv::ADV_DATA,
            scan_data: &scan_data,
        };

        unwrap!(state.advertising_started(true));
        info!("advertising as \"{}\"", config::DEVICE_NAME);

        // Keep draining sensor samples while no central is connected:
        // the stored value still tracks the latest reading, sends are
        // simply skipped.
        let mut adv_fut = pin!(peripheral::advertise_pairable(
            sd,
            advertisement,
            &adv_config,
            &PAIRING_WATCHER
        ));
        let conn = loop {
            match select(&mut adv_fut, SENSOR_INBOX.receive()).await {
                Either::First(Ok(conn)) => break conn,
                Either::First(Err(e)) => {
                    // Fatal for this boot cycle: log, mark failed, halt.
                    let _ = state.advertising_started(false);
                    error!("advertising failed to start: {:?}", e);
                    core::future::pending().await
                }
                Either::Second(SensorMessage { channel_id, value }) => {
                    let _ = state.on_sample(channel_id, value);
                }
            }
        };

        if state.on_connected(conn.clone(), 0).is_ok() {
            info!("connected to {}", conn.peer_address());
        }

        let conn_params = raw::ble_gap_conn_params_t {
            min_conn_interval: config::BLE_CONN_INTERVAL_MIN,
            max_conn_interval: config::BLE_CONN_INTERVAL_MAX,
            slave_latency: config::BLE_SLAVE_LATENCY,
            conn_sup_timeout: config::BLE_SUP_TIMEOUT,
        };
        if let Err(e) = conn.set_conn_params(conn_params) {
            warn!("set_conn_params error: {:?}", e);
        }

        run_connection(server, &mut state, &conn).await;

        state.on_disconnected(0);
    }
}

/// Serve one connection until it drops.
async fn run_connection(server: &Server, state: &mut Peripheral<Connection>, conn: &Connection) {
    // Discard CCC events left over from a previous connection.
    while CCC_EVENTS.try_receive().is_ok() {}

    let mut gatt_fut = pin!(gatt_server::run(conn, server, |e| match e {
        ServerEvent::Hrs(HeartRateServiceEvent::HeartRateMeasurementCccdWrite {
            notifications,
        }) => {
            let _ = CCC_EVENTS.try_send(notifications);
        }
    }));

    loop {
        match select3(&mut gatt_fut, SENSOR_INBOX.receive(), CCC_EVENTS.receive()).await {
            Either3::First(e) => {
                info!("disconnected: {:?}", e);
                break;
            }
            Either3::Second(SensorMessage { channel_id, value }) => {
                if let Some(n) = state.on_sample(channel_id, value) {
                    // Best effort: the SoftDevice refuses the send while
                    // the central has notifications disabled.
                    if let Err(e) = server.hrs.heart_rate_measurement_notify(&n.conn, &n.value) {
                        warn!("notification dropped: {:?}", e);
                    }
                }
            }
            Either3::Third(notifications) => {
                // Single link, so the one CCC maps to client slot 0.
                state.on_ccc_changed(0, if notifications { CCC_NOTIFY } else { 0 });
                info!("notifications {}", if notifications { "enabled" } else { "disabled" });
            }
        }
    }
}
