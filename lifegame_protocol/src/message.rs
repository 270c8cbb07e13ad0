// Protocol messages for client-server communication.
//
// The protocol is line oriented. Every line is either a bare status token
// (`Status`) or a single JSON object:
// - `FieldInfo`:        server → client once after the name exchange.
// - `PlacementCommand`: client → server after each `placement` token.
// - `Observation`:      server → both clients, tagged by `"phase"`.
//
// `ServerLine` classifies an incoming server line so the client runtime can
// run one read loop instead of tracking which shape the next line must have.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::types::{Board, CellCounts, Player, Pos};

/// Fixed greeting the server sends as the very first line.
pub const GREETING: &str = "lifegame";

/// Status tokens sent by the server ahead of (or instead of) a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// It is the receiving client's turn to place a cell.
    Placement,
    /// The opponent is placing.
    Waiting,
    /// Placement is over; the simulation result follows.
    Simulation,
    YouWin,
    YouLose,
    Draw,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Placement => "placement",
            Status::Waiting => "waiting",
            Status::Simulation => "simulation",
            Status::YouWin => "you_win",
            Status::YouLose => "you_lose",
            Status::Draw => "draw",
        }
    }

    /// True for the three game-ending tokens.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::YouWin | Status::YouLose | Status::Draw)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placement" => Ok(Status::Placement),
            "waiting" => Ok(Status::Waiting),
            "simulation" => Ok(Status::Simulation),
            "you_win" => Ok(Status::YouWin),
            "you_lose" => Ok(Status::YouLose),
            "draw" => Ok(Status::Draw),
            other => Err(ProtocolError::UnknownStatus {
                token: other.to_owned(),
            }),
        }
    }
}

/// Board dimensions, sent once per connection. Authoritative for clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub height: usize,
    pub width: usize,
}

/// A client's chosen cell: `{"place": [row, col]}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCommand {
    pub place: Pos,
}

impl PlacementCommand {
    /// Parse a placement line. Any failure here (bad JSON, missing `place`,
    /// wrong element types) is a protocol violation.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Board observations broadcast identically to both clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Observation {
    /// After every accepted placement.
    Placement { board: Board, next_player: Player },
    /// After the simulation batch.
    LifeResult { board: Board, count: CellCounts },
}

impl Observation {
    pub fn board(&self) -> &Board {
        match self {
            Observation::Placement { board, .. } | Observation::LifeResult { board, .. } => board,
        }
    }
}

/// One line received by a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerLine {
    Status(Status),
    Observation(Observation),
}

impl ServerLine {
    /// JSON objects start with `{`; everything else must be a status token.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            Ok(ServerLine::Observation(serde_json::from_str(trimmed)?))
        } else {
            Ok(ServerLine::Status(trimmed.parse()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn status_tokens_roundtrip_through_text() {
        for status in [
            Status::Placement,
            Status::Waiting,
            Status::Simulation,
            Status::YouWin,
            Status::YouLose,
            Status::Draw,
        ] {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert!("you_won".parse::<Status>().is_err());
        assert!(Status::Draw.is_terminal());
        assert!(!Status::Waiting.is_terminal());
    }

    #[test]
    fn placement_command_parse_failures() {
        assert_eq!(
            PlacementCommand::parse(r#"{"place": [1, 2]}"#).unwrap().place,
            Pos::new(1, 2)
        );
        assert!(PlacementCommand::parse("not json").is_err());
        assert!(PlacementCommand::parse(r#"{"pos": [1, 2]}"#).is_err());
        assert!(PlacementCommand::parse(r#"{"place": "1,2"}"#).is_err());
        assert!(PlacementCommand::parse(r#"{"place": [1, 2, 3]}"#).is_err());
    }

    #[test]
    fn placement_observation_wire_shape() {
        let obs = Observation::Placement {
            board: vec![vec![Cell::Player1, Cell::Empty]],
            next_player: Player::Two,
        };
        assert_eq!(
            serde_json::to_string(&obs).unwrap(),
            r#"{"phase":"placement","board":[[1,0]],"next_player":2}"#
        );
    }

    #[test]
    fn life_result_wire_shape() {
        let obs = Observation::LifeResult {
            board: vec![vec![Cell::Empty, Cell::Player2]],
            count: CellCounts {
                player1: 0,
                player2: 1,
            },
        };
        assert_eq!(
            serde_json::to_string(&obs).unwrap(),
            r#"{"phase":"life_result","board":[[0,2]],"count":{"1":0,"2":1}}"#
        );
    }

    #[test]
    fn server_line_classification() {
        assert_eq!(
            ServerLine::parse("waiting").unwrap(),
            ServerLine::Status(Status::Waiting)
        );
        let line = r#"{"phase":"placement","board":[[0]],"next_player":1}"#;
        match ServerLine::parse(line).unwrap() {
            ServerLine::Observation(Observation::Placement { next_player, .. }) => {
                assert_eq!(next_player, Player::One);
            }
            other => panic!("expected placement observation, got {other:?}"),
        }
        assert!(ServerLine::parse(r#"{"phase":"unknown"}"#).is_err());
        assert!(ServerLine::parse("hello").is_err());
    }
}
