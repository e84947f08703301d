//! Peripheral core: one struct owning all mutable state.
//!
//! Everything the three asynchronous domains share - the active
//! connection handle, the subscription table, the measurement value and
//! the setup state machine - lives in a single [`Peripheral`] instance
//! owned by one event-loop task. Host-stack callbacks and sensor samples
//! are funnelled into its methods; effects (the one notification send)
//! come back out as plain values for the caller to execute. No global
//! state, no locks.
//!
//! The struct is generic over the connection handle type: the real
//! SoftDevice `Connection` on target, any cheap `Clone` double in host
//! tests.

use crate::config;
use crate::error::Error;
use crate::gatt::ccc::SubscriptionTable;
use crate::hrs::Measurement;

/// Peripheral-level lifecycle state.
///
/// `Failed` is terminal: fatal setup errors are unrecoverable for the
/// boot cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupState {
    Uninitialized,
    HostReady,
    Advertising,
    Connected,
    Failed,
}

/// A notification send the caller should perform, best effort.
///
/// Whether the central actually receives it is gated by the host stack
/// (an unsubscribed connection makes the send fail there); the core does
/// not consult the subscription table on this path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification<C> {
    /// Connection to deliver on, borrowed for the duration of the send.
    pub conn: C,
    /// Measurement value, `(raw << 8) | flags`.
    pub value: u16,
}

impl<C> Notification<C> {
    /// Wire payload, flags byte first.
    pub fn payload(&self) -> [u8; 2] {
        self.value.to_le_bytes()
    }
}

/// The single peripheral instance.
pub struct Peripheral<C: Clone> {
    state: SetupState,
    registered: bool,
    conn: Option<C>,
    subscriptions: SubscriptionTable,
    measurement: Measurement,
}

impl<C: Clone> Peripheral<C> {
    pub fn new() -> Self {
        Self {
            state: SetupState::Uninitialized,
            registered: false,
            conn: None,
            subscriptions: SubscriptionTable::new(),
            measurement: Measurement::default(),
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    // Setup (advertising/pairing controller)

    /// Host stack readiness callback. `ok == false` is fatal.
    pub fn on_host_ready(&mut self, ok: bool) -> Result<(), Error> {
        if self.state != SetupState::Uninitialized {
            return Err(Error::NotReady);
        }
        if !ok {
            self.state = SetupState::Failed;
            return Err(Error::HostInitFailed);
        }
        self.state = SetupState::HostReady;
        Ok(())
    }

    /// Record that the attribute table has been registered with the host
    /// stack. Exactly once, after readiness; anything else is fatal.
    pub fn mark_registered(&mut self) -> Result<(), Error> {
        if self.state == SetupState::Uninitialized || self.state == SetupState::Failed {
            return Err(Error::NotReady);
        }
        if self.registered {
            self.state = SetupState::Failed;
            return Err(Error::AlreadyRegistered);
        }
        self.registered = true;
        Ok(())
    }

    /// Outcome of an advertising start attempt. Failure is fatal, not
    /// retried.
    pub fn advertising_started(&mut self, ok: bool) -> Result<(), Error> {
        if !self.registered || self.state == SetupState::Failed {
            return Err(Error::NotReady);
        }
        if !ok {
            self.state = SetupState::Failed;
            return Err(Error::AdvertisingFailed);
        }
        self.state = SetupState::Advertising;
        Ok(())
    }

    // Connection lifecycle

    /// Connect callback from the host stack.
    ///
    /// A non-zero status means the link never came up: nothing is
    /// stored and the error is returned for logging only. On success the
    /// handle is retained as the single active connection.
    pub fn on_connected(&mut self, conn: C, status: u8) -> Result<(), Error> {
        if status != 0 {
            return Err(Error::ConnectionFailed(status));
        }
        // Single peripheral role: the host stack never reports a second
        // connect while one link is up.
        assert!(self.conn.is_none(), "connect while a connection is active");
        self.conn = Some(conn);
        self.state = SetupState::Connected;
        Ok(())
    }

    /// Disconnect callback. Clears the handle (no-op when none is held)
    /// and drops all subscriptions, so a reused client slot starts
    /// disabled. Advertising resumes via the connection loop.
    pub fn on_disconnected(&mut self, _reason: u8) {
        self.conn = None;
        self.subscriptions.reset_all();
        if self.state == SetupState::Connected {
            self.state = SetupState::Advertising;
        }
    }

    pub fn current_connection(&self) -> Option<&C> {
        self.conn.as_ref()
    }

    // Subscription state

    /// CCC descriptor write for `slot`.
    pub fn on_ccc_changed(&mut self, slot: usize, value: u16) {
        self.subscriptions.set(slot, value);
    }

    pub fn is_subscribed(&self, slot: usize) -> bool {
        self.subscriptions.is_subscribed(slot)
    }

    // Sensor ingest

    /// Inbound sample from the external sensor channel.
    ///
    /// Foreign channel ids are ignored. An accepted byte always updates
    /// the stored measurement; a notification effect is returned only
    /// when a connection is active. Latest value wins, no queueing.
    pub fn on_sample(&mut self, channel_id: u32, raw: u8) -> Option<Notification<C>> {
        if channel_id != config::HRS_CHANNEL_ID {
            return None;
        }
        self.measurement.update(raw);
        let conn = self.conn.clone()?;
        Some(Notification {
            conn,
            value: self.measurement.value(),
        })
    }

    /// Latest stored measurement, `(raw << 8) | flags`.
    pub fn measurement(&self) -> u16 {
        self.measurement.value()
    }
}

impl<C: Clone> Default for Peripheral<C> {
    fn default() -> Self {
        Self::new()
    }
}
