//! Application state machine.
//!
//! [`App`] manages the interactive state of the chat view, decoupled from
//! I/O and transport mechanics: the append-only transcript, the scroll
//! position, the connection indicator, and the submit flow.
//!
//! Every inbound event appends exactly one entry and snaps the view to its
//! bottom edge - unconditionally, with no "only if already near bottom"
//! heuristic. A reader who scrolled up is force-scrolled away on the next
//! message; that is the specified behavior of the upstream UI.

use crate::{AppAction, AppEvent, ConnectionIndicator, Entry};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in isolation.
#[derive(Debug, Clone)]
pub struct App {
    /// Connection phase for the status bar.
    indicator: ConnectionIndicator,
    /// Append-only transcript in arrival order.
    transcript: Vec<Entry>,
    /// Scroll position in entries above the bottom edge. Zero means the view
    /// is pinned to the latest entry.
    scroll_offset: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create an empty App. The session starts connecting immediately.
    pub fn new() -> Self {
        Self {
            indicator: ConnectionIndicator::Connecting,
            transcript: Vec::new(),
            scroll_offset: 0,
            terminal_size: (80, 24),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::EventReceived(event) => {
                self.transcript.push(Entry::from_event(&event));
                vec![AppAction::Render, AppAction::ScrollToBottom]
            },
            AppEvent::Connecting => {
                self.indicator = ConnectionIndicator::Connecting;
                vec![AppAction::Render]
            },
            AppEvent::Connected => {
                self.indicator = ConnectionIndicator::Connected;
                vec![AppAction::Render]
            },
            AppEvent::Disconnected { intentional } => {
                self.indicator = ConnectionIndicator::Disconnected { intentional };
                vec![AppAction::Render]
            },
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
        }
    }

    /// Submit outgoing text.
    ///
    /// The caller clears its input buffer before the publish outcome is
    /// known; a failed publish does not restore the typed text. Empty input
    /// is a no-op.
    pub fn submit(&self, raw_text: String) -> Vec<AppAction> {
        if raw_text.is_empty() {
            return vec![];
        }
        vec![AppAction::Publish { text: raw_text }, AppAction::Render]
    }

    /// Move the view one entry away from the bottom.
    pub fn scroll_up(&mut self) -> Vec<AppAction> {
        let max_offset = self.transcript.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(max_offset);
        vec![AppAction::Render]
    }

    /// Move the view one entry toward the bottom.
    pub fn scroll_down(&mut self) -> Vec<AppAction> {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        vec![AppAction::Render]
    }

    /// Pin the view to the latest entry.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Transcript entries in arrival order.
    pub fn transcript(&self) -> &[Entry] {
        &self.transcript
    }

    /// Scroll position in entries above the bottom edge.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Connection phase for the status bar.
    pub fn connection_indicator(&self) -> ConnectionIndicator {
        self.indicator
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
