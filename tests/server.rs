use std::{net::SocketAddr, path::PathBuf, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::broadcast,
    time::timeout,
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::{header::SEC_WEBSOCKET_PROTOCOL, HeaderValue},
        Message,
    },
    MaybeTlsStream, WebSocketStream,
};

use otter_step::{
    builder::FormulaSource,
    config::Config,
    server::{serve_on, Driver, ServerConfig, BROADCAST_CAPACITY},
};

const UNSAT: &str = "
 1  2 0
-1  2 0
 1 -2 0
-1 -2 0
";

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serves a driver for `dimacs` on some free local port.
async fn start(dimacs: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server_config = ServerConfig {
        port: address.port(),
        www: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("www"),
        tick_ms: 10,
        ..ServerConfig::default()
    };

    let (broadcast_tx, _) = broadcast::channel::<String>(BROADCAST_CAPACITY);
    let driver = Driver::new(
        Config::default(),
        server_config,
        FormulaSource::Text(dimacs.to_string()),
        broadcast_tx,
    )
    .unwrap();

    tokio::spawn(serve_on(listener, driver));
    address
}

async fn next_text(socket: &mut Socket) -> String {
    loop {
        let message = timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("a message in time")
            .expect("an open socket")
            .expect("a valid message");

        if let Message::Text(text) = message {
            return text;
        }
    }
}

async fn get(address: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(address).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    timeout(Duration::from_secs(2), stream.read_to_end(&mut response))
        .await
        .unwrap()
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn websocket_commands_and_broadcasts() {
    let address = start(UNSAT).await;

    let mut request = format!("ws://{address}/").into_client_request().unwrap();
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static("otter_step"));

    let (mut socket, response) = connect_async(request).await.unwrap();
    assert_eq!(
        response.headers().get(SEC_WEBSOCKET_PROTOCOL),
        Some(&HeaderValue::from_static("otter_step"))
    );

    socket.send(Message::Text("step".to_string())).await.unwrap();
    assert_eq!(next_text(&mut socket).await, r#"{"action":"step","data":1}"#);

    // Exhausts the session, without a broadcast.
    socket.send(Message::Text("step".to_string())).await.unwrap();
    // Ignored.
    socket.send(Message::Text("jump".to_string())).await.unwrap();

    socket.send(Message::Text("play".to_string())).await.unwrap();
    assert_eq!(next_text(&mut socket).await, r#"{"action":"play"}"#);
    assert_eq!(next_text(&mut socket).await, r#"{"action":"restart"}"#);

    socket.send(Message::Text("pause".to_string())).await.unwrap();
    assert_eq!(next_text(&mut socket).await, r#"{"action":"pause"}"#);

    socket.close(None).await.ok();
}

#[tokio::test]
async fn every_observer_sees_broadcasts() {
    let address = start(UNSAT).await;

    let (mut first, _) = connect_async(format!("ws://{address}/")).await.unwrap();
    let (mut second, _) = connect_async(format!("ws://{address}/")).await.unwrap();

    first.send(Message::Text("restart".to_string())).await.unwrap();
    assert_eq!(next_text(&mut first).await, r#"{"action":"restart"}"#);
    assert_eq!(next_text(&mut second).await, r#"{"action":"restart"}"#);

    first.close(None).await.ok();
    second.close(None).await.ok();
}

#[tokio::test]
async fn static_assets() {
    let address = start(UNSAT).await;

    let index = get(address, "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(index.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(index.to_ascii_lowercase().contains("content-type: text/html"));
    assert!(index.contains("otter_step.js"));

    let script = get(address, "GET /otter_step.js?v=1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(script.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(script.contains("application/javascript"));

    let outside = get(address, "GET /../Cargo.toml HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n").await;
    assert!(outside.starts_with("HTTP/1.1 404 Not Found\r\n"));

    let post = get(address, "POST / HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    assert!(post.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
}

#[tokio::test]
async fn slow_request_head() {
    let address = start(UNSAT).await;

    let mut stream = TcpStream::connect(address).await.unwrap();
    stream
        .write_all(b"GET /default.css HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(700)).await;
    stream.write_all(b"\r\n").await.unwrap();

    let mut response = Vec::new();
    timeout(Duration::from_secs(2), stream.read_to_end(&mut response))
        .await
        .unwrap()
        .unwrap();
    let response = String::from_utf8_lossy(&response);
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("text/css"));
}
