//! Commands received from observers, and broadcasts to observers.

use std::str::FromStr;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::types::err::{self};

/// A command from an observer.
///
/// Commands are case-sensitive, and surrounding whitespace is not ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Restart,
    Play,
    Pause,
    Step,
}

impl FromStr for Command {
    type Err = err::CommandError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "restart" => Ok(Self::Restart),
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "step" => Ok(Self::Step),
            unknown => Err(err::CommandError::Unknown(unknown.to_string())),
        }
    }
}

/// A broadcast to every observer.
///
/// Serialised as an object with an `action` field and, for a step, the size of the trail as a `data` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "lowercase")]
pub enum Broadcast {
    Restart,
    Play,
    Pause,
    Step(usize),
}

/// Something which passes broadcasts on to observers.
pub trait Observers {
    /// Broadcasts `message`, returning the count of observers the message was passed to.
    fn broadcast(&self, message: &Broadcast) -> Result<usize, err::BroadcastError>;
}

impl Observers for broadcast::Sender<String> {
    fn broadcast(&self, message: &Broadcast) -> Result<usize, err::BroadcastError> {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(_) => return Err(err::BroadcastError::Serialisation),
        };

        match self.send(json) {
            Ok(count) => Ok(count),
            Err(_) => Err(err::BroadcastError::NoObservers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_json() {
        let as_json = |message: Broadcast| serde_json::to_string(&message).unwrap();

        assert_eq!(as_json(Broadcast::Restart), r#"{"action":"restart"}"#);
        assert_eq!(as_json(Broadcast::Play), r#"{"action":"play"}"#);
        assert_eq!(as_json(Broadcast::Pause), r#"{"action":"pause"}"#);
        assert_eq!(as_json(Broadcast::Step(17)), r#"{"action":"step","data":17}"#);
    }

    #[test]
    fn commands_are_exact() {
        assert_eq!("restart".parse(), Ok(Command::Restart));
        assert_eq!("play".parse(), Ok(Command::Play));
        assert_eq!("pause".parse(), Ok(Command::Pause));
        assert_eq!("step".parse(), Ok(Command::Step));

        for text in ["Step", " step", "step\n", "", "stop"] {
            assert_eq!(
                text.parse::<Command>(),
                Err(err::CommandError::Unknown(text.to_string()))
            );
        }
    }

    #[test]
    fn sender_without_receivers() {
        let (tx, _) = broadcast::channel::<String>(4);
        assert_eq!(
            tx.broadcast(&Broadcast::Play),
            Err(err::BroadcastError::NoObservers)
        );

        let mut rx = tx.subscribe();
        assert_eq!(tx.broadcast(&Broadcast::Step(3)), Ok(1));
        assert_eq!(rx.try_recv().unwrap(), r#"{"action":"step","data":3}"#);
    }
}
