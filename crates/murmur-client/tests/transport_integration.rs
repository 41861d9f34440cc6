//! Integration tests for the subscription and publish transports.
//!
//! These tests verify the real I/O layer by connecting actual WebSocket and
//! HTTP clients to minimal in-process servers. Lifecycle classification is
//! checked end to end by feeding the observed transport events through the
//! Sans-IO connection state machine.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use murmur_client::transport;
use murmur_client::{ClientAction, Connection, ConnectionState, Endpoints, FixedDelay, Publisher, TransportEvent};
use murmur_proto::{ChatEvent, MessageKind, close_code};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Bind a listener and return it with the matching subscription URL.
async fn bind_ws() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}/subscribe", listener.local_addr().unwrap());
    (listener, url)
}

fn event_json(kind: MessageKind, message: &str) -> String {
    let event = ChatEvent {
        message_type: kind,
        message: message.to_string(),
        created: "2024-01-02T12:20:05Z".to_string(),
    };
    serde_json::to_string(&event).unwrap()
}

async fn next_event(sub: &mut transport::Subscription) -> TransportEvent {
    timeout(TIMEOUT, sub.events.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn subscription_opens_and_delivers_frames_in_order() {
    let (listener, url) = bind_ws().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        for i in 0..3 {
            let payload = event_json(MessageKind::Chat, &format!("msg-{i}"));
            ws.send(Message::text(payload)).await.unwrap();
        }
        // Keep the socket open until the client has read everything.
        tokio::time::sleep(Duration::from_millis(500)).await;
    });

    let mut sub = transport::subscribe(url);
    let mut conn = Connection::connect(FixedDelay::default());

    assert_eq!(next_event(&mut sub).await, TransportEvent::Opened);
    conn.handle(TransportEvent::Opened).unwrap();

    let mut received = Vec::new();
    while received.len() < 3 {
        for action in conn.handle(next_event(&mut sub).await).unwrap() {
            if let ClientAction::Deliver(event) = action {
                received.push(event.message);
            }
        }
    }

    assert_eq!(received, vec!["msg-0", "msg-1", "msg-2"]);
    sub.stop();
}

#[tokio::test]
async fn going_away_close_is_observed_as_intentional() {
    let (listener, url) = bind_ws().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.close(Some(CloseFrame { code: CloseCode::Away, reason: "going away".into() }))
            .await
            .unwrap();
        // Drive the close handshake to completion.
        while ws.next().await.is_some() {}
    });

    let mut sub = transport::subscribe(url);
    let mut conn = Connection::connect(FixedDelay::default());

    conn.handle(next_event(&mut sub).await).unwrap();
    assert_eq!(*conn.state(), ConnectionState::Open);

    let close = next_event(&mut sub).await;
    match &close {
        TransportEvent::Closed(info) => assert_eq!(info.code, close_code::GOING_AWAY),
        other => panic!("expected close, got {other:?}"),
    }

    let actions = conn.handle(close).unwrap();
    assert!(actions.is_empty(), "intentional close must never schedule a reconnect");
    assert!(matches!(conn.state(), ConnectionState::Closed { intentional: true, .. }));
}

#[tokio::test]
async fn dropped_socket_is_observed_as_abnormal_and_schedules_reconnect() {
    let (listener, url) = bind_ws().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        // Drop without a close handshake.
        drop(ws);
    });

    let mut sub = transport::subscribe(url);
    let mut conn = Connection::connect(FixedDelay::default());

    conn.handle(next_event(&mut sub).await).unwrap();

    let close = next_event(&mut sub).await;
    let actions = conn.handle(close).unwrap();

    assert_eq!(actions, vec![ClientAction::ScheduleReconnect {
        delay: Duration::from_millis(1000),
    }]);

    // The machine can re-enter the connect cycle after the delay fires.
    conn.reconnect().unwrap();
    assert_eq!(*conn.state(), ConnectionState::Connecting);
}

#[tokio::test]
async fn refused_connection_funnels_through_the_close_path() {
    // Grab a free port, then close the listener so nothing accepts.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}/subscribe", listener.local_addr().unwrap());
    drop(listener);

    let mut sub = transport::subscribe(url);

    match next_event(&mut sub).await {
        TransportEvent::Closed(info) => {
            assert_eq!(info.code, close_code::ABNORMAL);
            assert!(!info.is_intentional());
        },
        other => panic!("expected close, got {other:?}"),
    }
}

#[tokio::test]
async fn publish_posts_raw_body_and_discards_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut len = 0;
        loop {
            let n = stream.read(&mut buf[len..]).await.unwrap();
            len += n;
            let request = String::from_utf8_lossy(&buf[..len]).to_string();
            if let Some(header_end) = request.find("\r\n\r\n") {
                if request.len() - (header_end + 4) >= "hello world".len() {
                    stream
                        .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
                        .await
                        .unwrap();
                    return request;
                }
            }
            assert!(n > 0, "connection closed before full request arrived");
        }
    });

    let endpoints = Endpoints::from_base(&format!("http://{addr}")).unwrap();
    let publisher = Publisher::new(&endpoints);

    publisher.publish("hello world".to_string()).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /publish HTTP/1.1\r\n"), "request line: {request}");
    assert!(request.ends_with("hello world"), "body must be the raw text, not JSON-wrapped");
}

#[tokio::test]
async fn publish_failure_is_an_error_not_a_panic() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoints = Endpoints::from_base(&format!("http://{addr}")).unwrap();
    let publisher = Publisher::new(&endpoints);

    assert!(publisher.publish("lost".to_string()).await.is_err());
}
