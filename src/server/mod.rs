/*!
A driver which owns a session, and exposes the session to observers over a websocket.

# Overview

A single task owns the [Driver], and so the session.
The task alternates between:
- Waiting, for at most one tick, for commands.
- If the session is playing, a step (and broadcast) or a restart on exhaustion.

Connections are served by a separate task, see [transport].
A connection either:
- Upgrades to a websocket, and then forwards text received to the driver and broadcasts from the driver to the socket.
- Requests a static file of the browser client, see [assets].

No connection touches the session.

# Commands and broadcasts

Commands are exact text, see [Command].
Broadcasts are JSON, see [Broadcast].

| Command   | Effect |
|-----------|--------|
| `restart` | The session is rebuilt from the formula, and `{"action":"restart"}` is broadcast. |
| `play`    | The session is set to play, and `{"action":"play"}` is broadcast. |
| `pause`   | The session is paused, and `{"action":"pause"}` is broadcast. |
| `step`    | A step is taken and, if the session is not exhausted, `{"action":"step","data":<trail size>}` is broadcast before the session is rewound. |

While playing, each tick acts as a `step` command, and on exhaustion the session is restarted.
*/

pub mod assets;
pub mod driver;
pub mod protocol;
pub mod transport;

pub use driver::Driver;
pub use protocol::{Broadcast, Command, Observers};

use std::{path::PathBuf, sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc},
};

use crate::{
    builder::FormulaSource,
    config::{defaults, Config},
    misc::log::targets::{self},
    types::err::{self},
};

/// The count of messages kept for an observer which is slow to read.
pub const BROADCAST_CAPACITY: usize = 256;

/// Whether the session is rewound to level zero after each external step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RewindPolicy {
    #[default]
    /// Rewind after every step, keeping learnt clauses
    Always,
    /// Keep the trail between steps
    Never,
}

impl std::fmt::Display for RewindPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "always"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// The unit of work of an external step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StepGranularity {
    #[default]
    /// Decide and propagate until a conflict is resolved
    Conflict,
    /// A single decision or conflict
    Event,
}

impl std::fmt::Display for StepGranularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict => write!(f, "conflict"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Configuration of a server.
#[derive(Clone, Debug, Serialize)]
pub struct ServerConfig {
    /// The port to listen on, for both websockets and static files.
    pub port: u16,

    /// The DIMACS file read on each restart.
    pub formula: PathBuf,

    /// The directory static files are served from.
    pub www: PathBuf,

    /// The longest wait for a command, in milliseconds, and so the delay between steps while playing.
    pub tick_ms: u64,

    pub rewind: RewindPolicy,

    pub granularity: StepGranularity,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: defaults::PORT,
            formula: PathBuf::from(defaults::FORMULA),
            www: PathBuf::from(defaults::WWW),
            tick_ms: defaults::TICK_MS,
            rewind: RewindPolicy::default(),
            granularity: StepGranularity::default(),
        }
    }
}

/// Builds a driver for the formula of `server_config` and serves the driver on the port of `server_config`.
///
/// Returns only on error, or if the listener stops accepting connections.
pub async fn serve(config: Config, server_config: ServerConfig) -> Result<(), err::ServerError> {
    let (broadcast_tx, _) = broadcast::channel::<String>(BROADCAST_CAPACITY);
    let source = FormulaSource::File(server_config.formula.clone());
    let port = server_config.port;

    if let Ok(json) = serde_json::to_string(&server_config) {
        log::info!(target: targets::SERVER, "Server configuration: {json}");
    }
    if let Ok(json) = serde_json::to_string(&config) {
        log::debug!(target: targets::SERVER, "Session configuration: {json}");
    }

    let driver = Driver::new(config, server_config, source, broadcast_tx)?;

    let listener = match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => return Err(err::ServerError::Bind(e)),
    };

    serve_on(listener, driver).await
}

/// Serves `driver` on `listener`.
pub async fn serve_on(
    listener: TcpListener,
    mut driver: Driver<broadcast::Sender<String>>,
) -> Result<(), err::ServerError> {
    if let Ok(address) = listener.local_addr() {
        log::info!(target: targets::SERVER, "Listening on {address}");
    }

    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<String>();
    let connections = transport::Connections {
        www: Arc::new(driver.server_config().www.clone()),
        commands: command_tx,
        broadcasts: driver.observers().clone(),
    };
    let tick = Duration::from_millis(driver.server_config().tick_ms);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, transport::router(connections)).await {
            log::error!(target: targets::SERVER, "Server error: {e}");
        }
    });

    loop {
        driver.tick()?;

        match tokio::time::timeout(tick, command_rx.recv()).await {
            Ok(Some(text)) => {
                driver.receive(&text)?;
                while let Ok(text) = command_rx.try_recv() {
                    driver.receive(&text)?;
                }
            }

            Ok(None) => {
                log::info!(target: targets::SERVER, "No further connections will be accepted");
                return Ok(());
            }

            Err(_) => {}
        }
    }
}
