//! Client errors.
//!
//! The lifecycle manager has exactly one error: a caller violating the
//! connection lifecycle. Malformed frames and transport losses are not
//! errors at this boundary - they are recovered or classified by the state
//! machine itself.

use thiserror::Error;

use crate::ConnectionState;

/// Errors from the connection state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Invalid state transition attempted by the caller.
    #[error("invalid state transition: cannot {operation} from {state:?}")]
    InvalidState {
        /// State when the error occurred.
        state: ConnectionState,
        /// Operation that was attempted.
        operation: &'static str,
    },
}
