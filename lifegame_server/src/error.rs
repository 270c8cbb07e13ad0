// Error types for the server loop and the client runtime.
//
// `SessionError` ends a server session without a result: the game was
// aborted, not lost. Forfeits are not errors; they are reported through
// `SessionReport`. `ClientError` is everything that stops a client before it
// receives a terminal status token.

use std::io;

use derive_more::{Display, Error};
use lifegame_engine::{BoardError, ConfigError, StrategyError};
use lifegame_protocol::ProtocolError;

/// Which part of the session a disconnect interrupted.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SessionStage {
    #[display("handshake")]
    Handshake,
    #[display("placement")]
    Placement,
}

#[derive(Debug, Display, Error)]
pub enum SessionError {
    #[display("i/o error: {source}")]
    Io { source: io::Error },
    #[display("participant {index} disconnected during {stage}")]
    Disconnected { index: usize, stage: SessionStage },
    #[display("invalid game config: {source}")]
    Config { source: ConfigError },
}

impl From<io::Error> for SessionError {
    fn from(source: io::Error) -> Self {
        SessionError::Io { source }
    }
}

impl From<ConfigError> for SessionError {
    fn from(source: ConfigError) -> Self {
        SessionError::Config { source }
    }
}

#[derive(Debug, Display, Error)]
pub enum ClientError {
    #[display("i/o error: {source}")]
    Io { source: io::Error },
    #[display("server closed the connection")]
    Disconnected,
    #[display("unexpected greeting {received:?}")]
    GreetingMismatch { received: String },
    #[display("protocol error: {source}")]
    Protocol { source: ProtocolError },
    #[display("invalid board from server: {source}")]
    Board { source: BoardError },
    #[display("strategy failed: {source}")]
    Strategy { source: StrategyError },
}

impl From<io::Error> for ClientError {
    fn from(source: io::Error) -> Self {
        ClientError::Io { source }
    }
}

impl From<ProtocolError> for ClientError {
    fn from(source: ProtocolError) -> Self {
        ClientError::Protocol { source }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(source: serde_json::Error) -> Self {
        ClientError::Protocol {
            source: ProtocolError::from(source),
        }
    }
}

impl From<BoardError> for ClientError {
    fn from(source: BoardError) -> Self {
        ClientError::Board { source }
    }
}

impl From<StrategyError> for ClientError {
    fn from(source: StrategyError) -> Self {
        ClientError::Strategy { source }
    }
}
