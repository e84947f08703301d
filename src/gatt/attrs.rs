//! Static attribute table for the GAP and Heart Rate services.
//!
//! The table is declarative: each record pairs a 16-bit UUID with a
//! polymorphic handler. Read handlers are pure functions of fixed
//! constant data and the caller-supplied offset, with standard
//! attribute-read semantics (partial and offset reads supported). The
//! measurement attribute deliberately has no read handler; the host
//! stack rejects reads on it with its usual "not permitted" error.

use crate::config;

// Assigned 16-bit UUIDs

pub const UUID_GAP_SERVICE: u16 = 0x1800;
pub const UUID_GAP_DEVICE_NAME: u16 = 0x2A00;
pub const UUID_GAP_APPEARANCE: u16 = 0x2A01;
pub const UUID_HRS_SERVICE: u16 = 0x180D;
pub const UUID_HRS_MEASUREMENT: u16 = 0x2A37;
pub const UUID_CCC: u16 = 0x2902;

// Characteristic property bits (Bluetooth Core, ATT)

pub const CHRC_READ: u8 = 0x02;
pub const CHRC_NOTIFY: u8 = 0x10;

/// What a record in the table is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttrKind {
    /// Primary service declaration.
    PrimaryService,
    /// Characteristic declaration with its property bits.
    Characteristic(u8),
    /// Characteristic value or descriptor.
    Descriptor,
}

/// Runtime behaviour of a record.
pub enum AttrHandler {
    /// No runtime behaviour (service and characteristic declarations).
    None,
    /// Readable constant value, served through an offset-read function.
    Read(fn(offset: usize, buf: &mut [u8]) -> usize),
    /// Server-initiated pushes only; reads are not permitted.
    Notify,
    /// CCC descriptor; writes are routed to the subscription table.
    Ccc,
}

/// One record of the attribute table.
pub struct Attribute {
    pub uuid: u16,
    pub kind: AttrKind,
    pub handler: AttrHandler,
}

impl Attribute {
    const fn service(uuid: u16) -> Self {
        Self {
            uuid,
            kind: AttrKind::PrimaryService,
            handler: AttrHandler::None,
        }
    }

    const fn characteristic(uuid: u16, props: u8) -> Self {
        Self {
            uuid,
            kind: AttrKind::Characteristic(props),
            handler: AttrHandler::None,
        }
    }

    const fn value(uuid: u16, handler: AttrHandler) -> Self {
        Self {
            uuid,
            kind: AttrKind::Descriptor,
            handler,
        }
    }
}

/// GAP service: device name and appearance, both readable constants.
pub static GAP_ATTRS: [Attribute; 5] = [
    Attribute::service(UUID_GAP_SERVICE),
    Attribute::characteristic(UUID_GAP_DEVICE_NAME, CHRC_READ),
    Attribute::value(UUID_GAP_DEVICE_NAME, AttrHandler::Read(read_name)),
    Attribute::characteristic(UUID_GAP_APPEARANCE, CHRC_READ),
    Attribute::value(UUID_GAP_APPEARANCE, AttrHandler::Read(read_appearance)),
];

/// Heart Rate service: notify-only measurement plus its CCC descriptor.
pub static HRS_ATTRS: [Attribute; 4] = [
    Attribute::service(UUID_HRS_SERVICE),
    Attribute::characteristic(UUID_HRS_MEASUREMENT, CHRC_NOTIFY),
    Attribute::value(UUID_HRS_MEASUREMENT, AttrHandler::Notify),
    Attribute::value(UUID_CCC, AttrHandler::Ccc),
];

/// Index of the measurement value record inside [`HRS_ATTRS`], the
/// attribute notifications are issued on.
pub const HRS_MEASUREMENT_ATTR: usize = 2;

/// Error returned when dispatching a read to a non-readable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// The attribute does not support reads (notify-only value, or a
    /// declaration record).
    NotPermitted,
}

/// Serve a read of `attr` at `offset` into `buf`.
///
/// Returns the number of bytes written, or [`ReadError::NotPermitted`]
/// for records without a read handler.
pub fn read(attr: &Attribute, offset: usize, buf: &mut [u8]) -> Result<usize, ReadError> {
    match attr.handler {
        AttrHandler::Read(f) => Ok(f(offset, buf)),
        _ => Err(ReadError::NotPermitted),
    }
}

/// Standard attribute-read semantics over a constant value.
///
/// An offset past the end of the value yields zero bytes; otherwise the
/// longest contiguous slice starting at `offset` that fits `buf`.
pub fn attr_read(value: &[u8], offset: usize, buf: &mut [u8]) -> usize {
    if offset > value.len() {
        return 0;
    }
    let n = buf.len().min(value.len() - offset);
    buf[..n].copy_from_slice(&value[offset..offset + n]);
    n
}

fn read_name(offset: usize, buf: &mut [u8]) -> usize {
    attr_read(config::DEVICE_NAME.as_bytes(), offset, buf)
}

fn read_appearance(offset: usize, buf: &mut [u8]) -> usize {
    attr_read(&config::APPEARANCE.to_le_bytes(), offset, buf)
}
