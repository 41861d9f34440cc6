//! Outgoing publish channel.
//!
//! Messages go out over a plain HTTP request, independent of the push
//! subscription. The request body is the raw message text; the response is
//! awaited and discarded. There is no retry - a failed publish is log-only
//! at the call site.

use thiserror::Error;

use crate::Endpoints;

/// Error from a failed publish request.
#[derive(Debug, Error)]
#[error("publish request failed: {0}")]
pub struct PublishError(#[from] reqwest::Error);

/// Sends outgoing messages to the publish endpoint.
#[derive(Debug, Clone)]
pub struct Publisher {
    http: reqwest::Client,
    url: String,
}

impl Publisher {
    /// Publisher for the given endpoints.
    pub fn new(endpoints: &Endpoints) -> Self {
        Self { http: reqwest::Client::new(), url: endpoints.publish.clone() }
    }

    /// Send one message as the full request body.
    ///
    /// Ownership of `text` transfers to the request; the server's response
    /// carries no contract this client consumes.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if the request could not be completed. The
    /// caller does not retry.
    pub async fn publish(&self, text: String) -> Result<(), PublishError> {
        self.http.post(&self.url).body(text).send().await?;
        Ok(())
    }
}
