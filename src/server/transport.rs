/*!
Connections to the server.

Websockets and static files are served on the same port, by an [axum] [Router]:
- A `GET /` which asks to upgrade becomes a websocket, and the connection then observes the driver.
- Any other `GET` of an allow-listed path is answered from the [assets](crate::server::assets).
- Any other path is `404 Not Found`, and any other method on an allow-listed path is `405 Method Not Allowed`.

An observing connection forwards text to the driver, and broadcasts from the driver to the socket.
If the connection falls behind the broadcasts, the broadcasts missed are skipped.
*/

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::Uri,
    response::Response,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{
    broadcast::{self, error::RecvError},
    mpsc,
};

use crate::{
    misc::log::targets::{self},
    server::assets::{self},
};

/// The websocket subprotocol, echoed when requested.
pub const PROTOCOL: &str = "otter_step";

/// Shared by every connection.
#[derive(Clone)]
pub struct Connections {
    /// The directory static files are served from.
    pub www: Arc<PathBuf>,

    /// Text received from observers, for the driver.
    pub commands: mpsc::UnboundedSender<String>,

    /// Broadcasts from the driver, subscribed to by each observer.
    pub broadcasts: broadcast::Sender<String>,
}

/// The routes of the server.
pub fn router(connections: Connections) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/index.html", get(asset))
        .route("/default.css", get(asset))
        .route("/favicon.ico", get(asset))
        .route("/otter_step.js", get(asset))
        .fallback(not_found)
        .with_state(connections)
}

/// Upgrades to an observer if asked, and otherwise serves the index.
async fn root(
    upgrade: Option<WebSocketUpgrade>,
    State(connections): State<Connections>,
    uri: Uri,
) -> Response {
    match upgrade {
        Some(upgrade) => {
            let commands = connections.commands.clone();
            let broadcasts = connections.broadcasts.subscribe();

            upgrade
                .protocols([PROTOCOL])
                .on_upgrade(move |socket| observe(socket, commands, broadcasts))
        }

        None => assets::get(&connections.www, uri.path()).await,
    }
}

async fn asset(State(connections): State<Connections>, uri: Uri) -> Response {
    log::debug!(target: targets::SERVER, "GET {uri}");
    assets::get(&connections.www, uri.path()).await
}

async fn not_found(uri: Uri) -> Response {
    log::debug!(target: targets::SERVER, "No route to {uri}");
    assets::not_found()
}

/// Passes text from `socket` to `commands` and broadcasts to `socket` until either side closes.
async fn observe(
    socket: WebSocket,
    commands: mpsc::UnboundedSender<String>,
    mut broadcasts: broadcast::Receiver<String>,
) {
    let (mut sink, mut source) = socket.split();

    log::info!(target: targets::SERVER, "Observer connected");

    loop {
        tokio::select! {
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if commands.send(text).is_err() {
                        break;
                    }
                }

                Some(Ok(Message::Close(_))) | None => break,

                Some(Ok(_)) => {}

                Some(Err(e)) => {
                    log::warn!(target: targets::SERVER, "Observer error: {e}");
                    break;
                }
            },

            outgoing = broadcasts.recv() => match outgoing {
                Ok(message) => {
                    if let Err(e) = sink.send(Message::Text(message)).await {
                        log::warn!(target: targets::SERVER, "Failed to send to an observer: {e}");
                        break;
                    }
                }

                Err(RecvError::Lagged(count)) => {
                    log::warn!(target: targets::SERVER, "An observer missed {count} broadcasts");
                }

                Err(RecvError::Closed) => break,
            },
        }
    }

    log::info!(target: targets::SERVER, "Observer disconnected");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        let (commands, _) = mpsc::unbounded_channel();
        let (broadcasts, _) = broadcast::channel(4);
        router(Connections {
            www: Arc::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("www")),
            commands,
            broadcasts,
        })
    }

    async fn status_of(method: Method, uri: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn allow_listed_routes() {
        for uri in ["/", "/index.html", "/default.css", "/favicon.ico", "/otter_step.js?v=2"] {
            assert_eq!(status_of(Method::GET, uri).await, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn index_without_upgrade() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn other_requests() {
        assert_eq!(status_of(Method::GET, "/Cargo.toml").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of(Method::GET, "/www/index.html").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of(Method::POST, "/").await, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(status_of(Method::DELETE, "/default.css").await, StatusCode::METHOD_NOT_ALLOWED);
    }
}
