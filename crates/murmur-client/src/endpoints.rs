//! Endpoint derivation.
//!
//! Both channels hang off one base URL: the push subscription at
//! `/subscribe` over the socket scheme, and outgoing messages at `/publish`
//! over the request scheme. `http` maps to `ws` and `https` to `wss`.

use thiserror::Error;

/// Errors from endpoint derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The base URL does not start with a supported scheme.
    #[error("unsupported scheme in base url: {0}")]
    UnsupportedScheme(String),
}

/// Resolved endpoint URLs for one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// WebSocket URL of the push subscription.
    pub subscribe: String,
    /// HTTP URL of the publish endpoint.
    pub publish: String,
}

impl Endpoints {
    /// Derive both endpoints from a base URL such as `http://host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::UnsupportedScheme`] unless the base URL uses
    /// `http` or `https`.
    pub fn from_base(base: &str) -> Result<Self, EndpointError> {
        let trimmed = base.trim_end_matches('/');

        let socket_base = if let Some(rest) = trimmed.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            return Err(EndpointError::UnsupportedScheme(base.to_string()));
        };

        Ok(Self {
            subscribe: format!("{socket_base}/subscribe"),
            publish: format!("{trimmed}/publish"),
        })
    }
}
