//! Application input events.
//!
//! Events originate from two sources: the connection manager (decoded events
//! and lifecycle phases) and the terminal (resize, ticks). Keyboard input is
//! handled by the frontend's input state, which calls the [`crate::App`] API
//! directly.

use murmur_proto::ChatEvent;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One decoded inbound event, in arrival order.
    EventReceived(ChatEvent),

    /// Connection attempt started.
    Connecting,

    /// Subscription is live.
    Connected,

    /// Subscription ended.
    Disconnected {
        /// True when the close is terminal for the session.
        intentional: bool,
    },

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}
