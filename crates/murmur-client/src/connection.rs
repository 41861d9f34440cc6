//! Connection state machine.
//!
//! Pure state machine in the event -> action style: the transport feeds
//! observed facts in as [`TransportEvent`]s, the machine classifies them and
//! returns [`ClientAction`]s for the runtime to execute. It never touches the
//! network itself.
//!
//! # Responsibilities
//!
//! - Tracks the single subscription's [`ConnectionState`].
//! - Decodes inbound frame payloads at the boundary; malformed frames are
//!   dropped and logged, never fatal.
//! - Classifies closes into intentional (going away, terminal) and
//!   unintentional (everything else, schedules exactly one reconnect).

use murmur_proto::{ChatEvent, CloseInfo};
use std::time::Duration;

use crate::{ClientError, FixedDelay, ReconnectPolicy};

/// Lifecycle state of the push subscription.
///
/// Owned exclusively by [`Connection`]; no other component reads or mutates
/// it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Subscription attempt in progress.
    Connecting,
    /// Live subscription delivering frames.
    Open,
    /// Subscription ended.
    Closed {
        /// Observed close code and reason.
        close: CloseInfo,
        /// True when the close is terminal for the session.
        intentional: bool,
    },
}

/// Facts observed by the transport, fed into the state machine in arrival
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The subscription finished its handshake.
    Opened,
    /// One inbound text frame payload, not yet decoded.
    Frame(String),
    /// The subscription ended. Open failures arrive here too - the transport
    /// does not distinguish "never opened" from "opened then closed".
    Closed(CloseInfo),
}

/// Instructions produced by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Hand one decoded event to the application layer.
    Deliver(ChatEvent),
    /// Re-enter [`Connection::reconnect`] after the delay.
    ScheduleReconnect {
        /// How long to wait before reconnecting.
        delay: Duration,
    },
}

/// Connection lifecycle manager.
///
/// At most one live subscription exists per instance: a reconnect is only
/// scheduled from a fully observed close, and [`Connection::reconnect`] is
/// the only way back to `Connecting`.
#[derive(Debug)]
pub struct Connection<P: ReconnectPolicy = FixedDelay> {
    state: ConnectionState,
    policy: P,
}

impl<P: ReconnectPolicy> Connection<P> {
    /// Start a connection attempt. The machine begins in
    /// [`ConnectionState::Connecting`]; the caller opens the transport.
    pub fn connect(policy: P) -> Self {
        Self { state: ConnectionState::Connecting, policy }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Process one transport event and return actions.
    ///
    /// Inbound frames are handled synchronously in call order, so delivery
    /// order equals arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidState`] when the caller violates the
    /// lifecycle, e.g. reports a second open while a subscription is live.
    pub fn handle(&mut self, event: TransportEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            TransportEvent::Opened => self.handle_opened(),
            TransportEvent::Frame(payload) => Ok(self.handle_frame(&payload)),
            TransportEvent::Closed(close) => Ok(self.handle_closed(close)),
        }
    }

    /// Return to `Connecting` after an unintentional close.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidState`] unless the state is an
    /// unintentional close: an intentional close is terminal, and a live
    /// subscription must never be doubled up.
    pub fn reconnect(&mut self) -> Result<(), ClientError> {
        match &self.state {
            ConnectionState::Closed { intentional: false, .. } => {
                self.state = ConnectionState::Connecting;
                Ok(())
            },
            state => Err(ClientError::InvalidState {
                state: state.clone(),
                operation: "reconnect",
            }),
        }
    }

    fn handle_opened(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        match self.state {
            ConnectionState::Connecting => {
                self.state = ConnectionState::Open;
                Ok(Vec::new())
            },
            ref state => Err(ClientError::InvalidState {
                state: state.clone(),
                operation: "open",
            }),
        }
    }

    fn handle_frame(&mut self, payload: &str) -> Vec<ClientAction> {
        if self.state != ConnectionState::Open {
            // Late frame raced a close; the close already won.
            return Vec::new();
        }

        match ChatEvent::decode(payload) {
            Ok(event) => vec![ClientAction::Deliver(event)],
            Err(error) => {
                tracing::warn!(%error, "dropping malformed frame");
                Vec::new()
            },
        }
    }

    fn handle_closed(&mut self, close: CloseInfo) -> Vec<ClientAction> {
        if matches!(self.state, ConnectionState::Closed { .. }) {
            // A close was already observed; keep the first classification.
            return Vec::new();
        }

        let intentional = close.is_intentional();
        tracing::info!(%close, intentional, "subscription closed");
        self.state = ConnectionState::Closed { close, intentional };

        if intentional {
            return Vec::new();
        }

        match self.policy.next_delay() {
            Some(delay) => vec![ClientAction::ScheduleReconnect { delay }],
            None => Vec::new(),
        }
    }
}
