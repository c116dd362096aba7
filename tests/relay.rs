use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use room_relay::{serve, RelayConfig};

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_LIMIT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(300);
const REGISTRATION_GRACE: Duration = Duration::from_millis(100);

async fn start_relay() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, RelayConfig::default()));
    addr
}

async fn join(addr: SocketAddr, path: &str) -> Ws {
    let (ws, _) = connect_async(format!("ws://{addr}{path}")).await.unwrap();
    ws
}

async fn expect_text(ws: &mut Ws, expected: &str) {
    let msg = timeout(RECV_LIMIT, ws.next())
        .await
        .expect("timed out waiting for message")
        .expect("stream ended")
        .expect("websocket error");
    assert_eq!(msg, Message::text(expected));
}

async fn expect_silence(ws: &mut Ws) {
    if let Ok(msg) = timeout(QUIET_PERIOD, ws.next()).await {
        panic!("expected no message, got {msg:?}");
    }
}

#[tokio::test]
async fn listener_receives_message_exactly_once() {
    let addr = start_relay().await;
    let mut alice = join(addr, "/team17/alice").await;
    let mut listener = join(addr, "/team17/").await;
    sleep(REGISTRATION_GRACE).await;

    alice.send(Message::text("hello")).await.unwrap();

    expect_text(&mut listener, "hello").await;
    expect_silence(&mut listener).await;
}

#[tokio::test]
async fn routing_respects_room_and_nickname() {
    let addr = start_relay().await;
    let mut alice = join(addr, "/r1_room/alice").await;
    let mut listener = join(addr, "/r1_room/").await;
    let mut other_room = join(addr, "/r2_room/").await;
    let mut bob = join(addr, "/r1_room/bob").await;
    sleep(REGISTRATION_GRACE).await;

    alice.send(Message::text("from alice")).await.unwrap();

    // Same nickname matches, so alice hears herself too
    expect_text(&mut alice, "from alice").await;
    expect_text(&mut listener, "from alice").await;
    expect_silence(&mut other_room).await;
    expect_silence(&mut bob).await;
}

#[tokio::test]
async fn listener_messages_go_nowhere() {
    let addr = start_relay().await;
    let mut quiet = join(addr, "/team17/").await;
    let mut other = join(addr, "/team17/").await;
    sleep(REGISTRATION_GRACE).await;

    quiet.send(Message::text("nobody hears this")).await.unwrap();

    expect_silence(&mut other).await;
    expect_silence(&mut quiet).await;
}

#[tokio::test]
async fn binary_payloads_are_forwarded_verbatim() {
    let addr = start_relay().await;
    let mut alice = join(addr, "/team17/alice").await;
    let mut listener = join(addr, "/team17/").await;
    sleep(REGISTRATION_GRACE).await;

    let payload = vec![0u8, 159, 146, 150, 255];
    alice.send(Message::binary(payload.clone())).await.unwrap();

    let msg = timeout(RECV_LIMIT, listener.next()).await.unwrap().unwrap().unwrap();
    assert_eq!(msg, Message::binary(payload));
}

#[tokio::test]
async fn invalid_paths_are_rejected() {
    let addr = start_relay().await;

    for path in ["/ab/alice", "/team17", "/team17/alice/x", "/team-17/alice"] {
        match connect_async(format!("ws://{addr}{path}")).await {
            Err(WsError::Http(response)) => assert_eq!(response.status(), StatusCode::NOT_FOUND),
            Err(other) => panic!("unexpected error for {path}: {other}"),
            Ok(_) => panic!("upgrade accepted for {path}"),
        }
    }
}

#[tokio::test]
async fn oversized_message_disconnects_sender() {
    let addr = start_relay().await;
    let mut alice = join(addr, "/team17/alice").await;
    let mut listener = join(addr, "/team17/").await;
    sleep(REGISTRATION_GRACE).await;

    let _ = alice.send(Message::binary(vec![7u8; 70 * 1024])).await;

    // The relay drops alice; her stream ends with a close or an error
    let ended = timeout(RECV_LIMIT, async {
        loop {
            match alice.next().await {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "alice was not disconnected");

    expect_silence(&mut listener).await;
}

#[tokio::test]
async fn disconnected_client_stops_receiving() {
    let addr = start_relay().await;
    let mut alice = join(addr, "/team17/alice").await;
    let mut listener = join(addr, "/team17/").await;
    let mut late = join(addr, "/team17/").await;
    sleep(REGISTRATION_GRACE).await;

    listener.close(None).await.unwrap();
    sleep(REGISTRATION_GRACE).await;

    alice.send(Message::text("after close")).await.unwrap();
    expect_text(&mut late, "after close").await;
}
