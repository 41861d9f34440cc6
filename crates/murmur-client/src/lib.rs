//! Connection lifecycle manager
//!
//! Owns the push-subscription lifecycle for the murmur chat stream: connect,
//! classify-close-and-maybe-reconnect, and ordered dispatch of decoded events.
//!
//! # Architecture
//!
//! The manager is Sans-IO: [`Connection`] receives transport facts
//! ([`TransportEvent`]), advances a small state machine, and returns
//! instructions ([`ClientAction`]) for the caller to execute. Real WebSocket
//! I/O lives behind the `transport` feature so the state machine stays fully
//! testable without a network.
//!
//! # Components
//!
//! - [`Connection`]: the connection state machine
//! - [`ReconnectPolicy`] / [`FixedDelay`]: retry scheduling after
//!   unintentional loss
//! - [`Endpoints`]: subscribe/publish URL derivation from one base URL
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides:
//! - [`transport::subscribe`]: spawn the WebSocket subscription task
//! - [`Publisher`]: fire-and-forget outgoing messages over HTTP

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod connection;
mod endpoints;
mod error;
mod policy;

#[cfg(feature = "transport")]
mod publish;
#[cfg(feature = "transport")]
pub mod transport;

pub use connection::{ClientAction, Connection, ConnectionState, TransportEvent};
pub use endpoints::{EndpointError, Endpoints};
pub use error::ClientError;
pub use policy::{FixedDelay, ReconnectPolicy};

#[cfg(feature = "transport")]
pub use publish::{PublishError, Publisher};
