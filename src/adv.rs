//! Fixed advertising and scan-response payloads.
//!
//! These are wire-visible and must match bit-for-bit: AD structure 1 is
//! the flags byte (general discoverable, BR/EDR not supported), AD
//! structure 2 the complete 16-bit service UUID list holding exactly the
//! Heart Rate service. The scan response carries the complete local name.

use heapless::Vec;

use crate::config::DEVICE_NAME;
use crate::gatt::attrs::UUID_HRS_SERVICE;

/// AD type codes.
pub const AD_TYPE_FLAGS: u8 = 0x01;
pub const AD_TYPE_UUID16_ALL: u8 = 0x03;
pub const AD_TYPE_NAME_COMPLETE: u8 = 0x09;

/// Flags byte bits.
pub const AD_FLAG_LE_GENERAL_DISC: u8 = 0x02;
pub const AD_FLAG_NO_BREDR: u8 = 0x04;

/// Legacy advertising payloads are capped at 31 bytes.
pub const AD_PAYLOAD_MAX: usize = 31;

// Name plus the length/type prefix has to fit one scan-response payload.
const _: () = assert!(DEVICE_NAME.len() + 2 <= AD_PAYLOAD_MAX);

/// Advertising payload: flags + 16-bit UUID list = [0x180D].
pub static ADV_DATA: [u8; 7] = [
    0x02,
    AD_TYPE_FLAGS,
    AD_FLAG_LE_GENERAL_DISC | AD_FLAG_NO_BREDR,
    0x03,
    AD_TYPE_UUID16_ALL,
    UUID_HRS_SERVICE.to_le_bytes()[0],
    UUID_HRS_SERVICE.to_le_bytes()[1],
];

/// Scan-response payload: complete local name.
pub fn scan_data() -> Vec<u8, AD_PAYLOAD_MAX> {
    let name = DEVICE_NAME.as_bytes();
    let mut out = Vec::new();
    // Cannot overflow, checked against AD_PAYLOAD_MAX at compile time.
    let _ = out.push(name.len() as u8 + 1);
    let _ = out.push(AD_TYPE_NAME_COMPLETE);
    let _ = out.extend_from_slice(name);
    out
}
