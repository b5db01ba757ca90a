//! Simulated connection state machine.
//!
//! The machine is a single owned record. Requests change state immediately;
//! timed stage changes happen in [`ConnectionMachine::advance`], which the
//! event loop calls with the current instant:
//!
//! ```text
//! Disconnected --connect--> Connecting --1s--> Authenticating --1s--> Securing --1s--> Connected
//! Connected --disconnect--> Disconnecting --1s--> Disconnected
//! ```
//!
//! Requests arriving in a transient stage are ignored.

use crate::browse::BrowseError;
use crate::catalog::ServerLocation;
use crate::constants::{ELAPSED_ZERO, STAGE_DWELL};
use crate::session::{RateSample, Session};
use crate::timer::Deadline;
use rand::Rng;
use std::time::Instant;

/// Connection lifecycle stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    /// Idle; the server may be changed.
    #[default]
    Disconnected,
    /// First connect stage.
    Connecting,
    /// Second connect stage.
    Authenticating,
    /// Third connect stage.
    Securing,
    /// Session active.
    Connected,
    /// Tearing down.
    Disconnecting,
}

impl ConnectionStatus {
    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting...",
            Self::Authenticating => "Authenticating...",
            Self::Securing => "Securing Connection...",
            Self::Connected => "Connected",
            Self::Disconnecting => "Disconnecting...",
        }
    }

    /// Returns `true` for the stages that advance on their own.
    pub fn is_transient(self) -> bool {
        self.after_dwell().is_some()
    }

    /// Stage entered once this one's dwell expires.
    fn after_dwell(self) -> Option<Self> {
        match self {
            Self::Connecting => Some(Self::Authenticating),
            Self::Authenticating => Some(Self::Securing),
            Self::Securing => Some(Self::Connected),
            Self::Disconnecting => Some(Self::Disconnected),
            Self::Disconnected | Self::Connected => None,
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Something [`ConnectionMachine::advance`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    /// A stage dwell expired.
    Status {
        /// Stage left.
        from: ConnectionStatus,
        /// Stage entered.
        to: ConnectionStatus,
    },
    /// A simulated page load finished.
    Browsed(String),
}

/// Owner of the connection status, the stage timer, and the live session.
#[derive(Clone, Debug)]
pub struct ConnectionMachine {
    status: ConnectionStatus,
    selected: &'static ServerLocation,
    stage: Option<Deadline>,
    session: Option<Session>,
}

impl ConnectionMachine {
    /// Creates a disconnected machine with `selected` as the active server.
    pub fn new(selected: &'static ServerLocation) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            selected,
            stage: None,
            session: None,
        }
    }

    /// Current stage.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Active server selection.
    pub fn selected(&self) -> &'static ServerLocation {
        self.selected
    }

    /// Live session, present only while connected.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Instant of the pending stage change, if any.
    pub fn next_stage_at(&self) -> Option<Instant> {
        self.stage.map(Deadline::at)
    }

    /// Changes the active server. Refused unless disconnected.
    pub fn select_server(&mut self, server: &'static ServerLocation) -> bool {
        if self.status != ConnectionStatus::Disconnected {
            return false;
        }
        self.selected = server;
        true
    }

    /// Starts the connect sequence. Accepted only while disconnected.
    pub fn request_connect(&mut self, now: Instant) -> bool {
        if self.status != ConnectionStatus::Disconnected {
            return false;
        }
        self.status = ConnectionStatus::Connecting;
        self.stage = Some(Deadline::after(now, STAGE_DWELL));
        true
    }

    /// Starts the disconnect sequence. Accepted only while connected.
    ///
    /// The session is dropped here, as the status leaves `Connected`.
    pub fn request_disconnect(&mut self, now: Instant) -> bool {
        if self.status != ConnectionStatus::Connected {
            return false;
        }
        self.session = None;
        self.status = ConnectionStatus::Disconnecting;
        self.stage = Some(Deadline::after(now, STAGE_DWELL));
        true
    }

    /// Connects when disconnected, disconnects when connected, otherwise does nothing.
    pub fn toggle(&mut self, now: Instant) -> bool {
        match self.status {
            ConnectionStatus::Disconnected => self.request_connect(now),
            ConnectionStatus::Connected => self.request_disconnect(now),
            _ => false,
        }
    }

    /// Submits a destination to the session's browser.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::NotConnected`] outside a session, or whatever the
    /// browser rejects the input with.
    pub fn browse(&mut self, input: &str, now: Instant) -> Result<String, BrowseError> {
        let session = self.session.as_mut().ok_or(BrowseError::NotConnected)?;
        session.browser_mut().request(input, now)
    }

    /// Applies every stage change and session tick that is due at `now`.
    ///
    /// Each stage change is anchored on the previous deadline, so a late call
    /// catches up through the whole chain in order.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: Instant, rng: &mut R) -> Vec<Update> {
        let mut updates = Vec::new();

        while let Some(deadline) = self.stage {
            if !deadline.is_due(now) {
                break;
            }
            let from = self.status;
            let Some(to) = from.after_dwell() else {
                self.stage = None;
                break;
            };
            self.enter(to, deadline.at(), rng);
            updates.push(Update::Status { from, to });
        }

        if let Some(session) = self.session.as_mut() {
            if let Some(message) = session.advance(now, rng) {
                updates.push(Update::Browsed(message));
            }
        }

        updates
    }

    fn enter<R: Rng + ?Sized>(&mut self, to: ConnectionStatus, at: Instant, rng: &mut R) {
        self.status = to;
        match to {
            ConnectionStatus::Connected => {
                self.stage = None;
                self.session = Some(Session::open(self.selected, at, rng));
            }
            ConnectionStatus::Disconnected => {
                self.stage = None;
                self.session = None;
            }
            _ => self.stage = Some(Deadline::after(at, STAGE_DWELL)),
        }
    }

    /// Elapsed time, `00:00:00` outside a session.
    pub fn elapsed_display(&self) -> String {
        self.session
            .as_ref()
            .map_or_else(|| ELAPSED_ZERO.to_string(), |s| s.elapsed().display())
    }

    /// Latest rates, zero outside a session.
    pub fn rates(&self) -> RateSample {
        self.session.as_ref().map(Session::rates).unwrap_or_default()
    }

    /// Session address, empty outside a session.
    pub fn address(&self) -> &str {
        self.session.as_ref().map_or("", Session::address)
    }
}
