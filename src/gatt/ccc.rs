//! Per-client notification subscription state (CCC descriptor values).

use crate::config::MAX_PAIRED_CLIENTS;

/// CCC value a client writes to enable notifications.
pub const CCC_NOTIFY: u16 = 0x0001;

/// Bounded table of per-client notify flags.
///
/// Each slot reflects the most recent CCC write observed for that client
/// slot; everything starts disabled. Slot indices come from the trusted
/// host stack, so an out-of-range index is a programming error and
/// panics.
pub struct SubscriptionTable {
    enabled: [bool; MAX_PAIRED_CLIENTS],
}

impl SubscriptionTable {
    pub const fn new() -> Self {
        Self {
            enabled: [false; MAX_PAIRED_CLIENTS],
        }
    }

    /// Record a CCC write for `slot`.
    ///
    /// Exactly the notify enable code subscribes; any other value,
    /// including the disable code and malformed writes, unsubscribes.
    /// Total function of the last write, no history.
    pub fn set(&mut self, slot: usize, value: u16) {
        self.enabled[slot] = value == CCC_NOTIFY;
    }

    pub fn is_subscribed(&self, slot: usize) -> bool {
        self.enabled[slot]
    }

    /// Return `slot` to its disabled default.
    ///
    /// Called when the connection owning the slot goes away, so a reused
    /// slot never inherits a stale subscription.
    pub fn reset(&mut self, slot: usize) {
        self.enabled[slot] = false;
    }

    pub fn reset_all(&mut self) {
        self.enabled = [false; MAX_PAIRED_CLIENTS];
    }
}

impl Default for SubscriptionTable {
    fn default() -> Self {
        Self::new()
    }
}
