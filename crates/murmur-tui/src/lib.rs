//! Terminal UI for murmur
//!
//! A thin terminal shell over the pure state machines: [`murmur_app::App`]
//! owns the view model, [`murmur_client::Connection`] owns the subscription
//! lifecycle, and this crate only wires them to crossterm events, ratatui
//! rendering, and the real transport.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod input;
pub mod runtime;
pub mod ui;

pub use input::InputState;
pub use runtime::{Runtime, RuntimeError};
