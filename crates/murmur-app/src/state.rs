//! Observable application state types.
//!
//! These structures are the view model: the subset of protocol state the UI
//! needs for rendering, projected from decoded events. The transcript is
//! append-only - entries are never reordered, deduplicated, or dropped.

use murmur_proto::{ChatEvent, MessageKind};

/// Sender label for chat entries.
///
/// The wire format carries no sender identity, so every chat message is
/// attributed to the same placeholder, matching the upstream server's UI.
pub const DEFAULT_SENDER: &str = "user";

/// Visual treatment of one transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Standard message treatment, attributed to a sender label.
    Chat {
        /// Sender attribution label.
        sender: String,
    },
    /// Positive treatment (join notice).
    Joined,
    /// Negative treatment (departure notice).
    Left,
}

/// One rendered unit of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Visual treatment.
    pub kind: EntryKind,
    /// Event text.
    pub text: String,
    /// Time-of-day label derived from the event's creation timestamp.
    pub time_label: String,
}

impl Entry {
    /// Project one decoded event into its visual unit.
    pub fn from_event(event: &ChatEvent) -> Self {
        let kind = match event.message_type {
            MessageKind::Welcome => EntryKind::Joined,
            MessageKind::Leave => EntryKind::Left,
            MessageKind::Chat => EntryKind::Chat { sender: DEFAULT_SENDER.to_string() },
        };

        Self { kind, text: event.message.clone(), time_label: event.time_label().to_string() }
    }
}

/// Connection phase mirrored for UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionIndicator {
    /// Connection attempt in progress.
    Connecting,
    /// Live subscription.
    Connected,
    /// Subscription lost.
    Disconnected {
        /// True when the server asked us not to come back.
        intentional: bool,
    },
}
