//! Wire model
//!
//! Data types shared between the connection layer and the application layer:
//! the decoded server-push event, the decode boundary, and close-frame
//! classification. This crate is pure data - no I/O, no async.
//!
//! # Components
//!
//! - [`ChatEvent`]: one decoded unit of server-pushed data
//! - [`MessageKind`]: tag routing for event payloads
//! - [`CloseInfo`]: classified close frames and the reconnect sentinel
//! - [`DecodeError`]: malformed-payload failure, recoverable by contract

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod close;
mod event;

pub use close::{CloseInfo, close_code};
pub use event::{ChatEvent, DecodeError, MessageKind};
