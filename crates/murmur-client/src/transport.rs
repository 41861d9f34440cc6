//! WebSocket transport for the push subscription.
//!
//! Provides [`subscribe`], which spawns a task bridging one WebSocket to a
//! channel of [`TransportEvent`]s. This is a thin layer that only observes
//! the socket - classification and reconnect decisions stay in the Sans-IO
//! [`Connection`](crate::Connection).
//!
//! Open failures are not surfaced as errors: the task folds them into a
//! [`TransportEvent::Closed`] so every loss funnels through the same close
//! path.

use futures::StreamExt;
use murmur_proto::{CloseInfo, close_code};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::TransportEvent;

/// Handle to a live subscription task.
///
/// The subscription object is exclusively owned by the caller; dropping the
/// receiver or calling [`Subscription::stop`] ends the task.
pub struct Subscription {
    /// Transport events in arrival order.
    pub events: mpsc::Receiver<TransportEvent>,
    abort_handle: tokio::task::AbortHandle,
}

impl Subscription {
    /// Abort the subscription task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Open a subscription to the server's push endpoint.
///
/// Returns immediately; the handshake runs on a spawned task. The first
/// event is either [`TransportEvent::Opened`] or, if the handshake fails,
/// a [`TransportEvent::Closed`] carrying an abnormal-closure code.
pub fn subscribe(url: impl Into<String>) -> Subscription {
    let url = url.into();
    let (events_tx, events_rx) = mpsc::channel(32);
    let handle = tokio::spawn(run_subscription(url, events_tx));
    Subscription { events: events_rx, abort_handle: handle.abort_handle() }
}

/// Drive one WebSocket until it closes, forwarding observed facts.
async fn run_subscription(url: String, events: mpsc::Sender<TransportEvent>) {
    let mut stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(error) => {
            tracing::warn!(%error, %url, "subscription handshake failed");
            let _ = events.send(TransportEvent::Closed(CloseInfo::abnormal(error.to_string()))).await;
            return;
        },
    };

    if events.send(TransportEvent::Opened).await.is_err() {
        return;
    }

    while let Some(item) = stream.next().await {
        match item {
            Ok(Message::Text(payload)) => {
                if events.send(TransportEvent::Frame(payload.to_string())).await.is_err() {
                    return;
                }
            },
            Ok(Message::Close(frame)) => {
                let close = frame.map_or_else(
                    || CloseInfo::new(close_code::NO_STATUS, ""),
                    |f| CloseInfo::new(u16::from(f.code), f.reason.to_string()),
                );
                let _ = events.send(TransportEvent::Closed(close)).await;
                return;
            },
            // Binary frames and ping/pong are not part of the protocol.
            Ok(_) => {},
            Err(error) => {
                let _ = events
                    .send(TransportEvent::Closed(CloseInfo::abnormal(error.to_string())))
                    .await;
                return;
            },
        }
    }

    // Stream ended without a close frame.
    let _ = events.send(TransportEvent::Closed(CloseInfo::abnormal("stream ended"))).await;
}
