//! Unified error type for hr2ble.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// The setup variants are fatal for the current boot cycle: the embedded
/// layer logs them and halts further setup instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The BLE host stack reported an initialisation failure.
    HostInitFailed,

    /// A setup step ran before the host stack signalled readiness,
    /// or after setup already failed.
    NotReady,

    /// The attribute table was registered a second time.
    AlreadyRegistered,

    /// Undirected connectable advertising could not be started.
    AdvertisingFailed,

    /// A connect callback reported a failed link establishment.
    /// Observational: nothing is stored, the status is only logged.
    ConnectionFailed(u8),
}
