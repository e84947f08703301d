//! GATT attribute model.
//!
//! Two pieces, both pure and host-testable:
//!
//! 1. **Attribute table** - the static declaration of the GAP and Heart
//!    Rate services, with offset-read handlers for the constant GAP
//!    values.
//! 2. **Subscription state** - the per-client notify flags behind the
//!    Heart Rate CCC descriptor.
//!
//! On target, the SoftDevice owns the wire-level attribute database; this
//! model is the single source of truth it is configured from, and the
//! place where descriptor writes land.

pub mod attrs;
pub mod ccc;
