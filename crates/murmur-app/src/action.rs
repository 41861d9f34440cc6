//! Application side-effects and intents.
//!
//! Instructions produced by the [`crate::App`] state machine for the runtime
//! to execute.

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Snap the transcript view to its bottom edge.
    ScrollToBottom,

    /// Send text to the publish endpoint, fire-and-forget.
    Publish {
        /// Raw outgoing text, exactly as typed.
        text: String,
    },

    /// Quit the application.
    Quit,
}
