// Core value types shared by the server, the engine and every client.
//
// `Cell` and `Player` use the protocol's integer encoding on the wire
// (0 = empty, 1 = player one, 2 = player two), so a `Board` serializes to the
// plain nested integer matrix both ends exchange. `Pos` travels as a
// two-element `[row, col]` array.
//
// Coordinates are signed: a client may send `[-1, 0]`, which must parse and
// then be rejected as an illegal move (forfeit) rather than a malformed one.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// State of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// Integer value used on the wire.
    pub const fn wire(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Player1 => 1,
            Cell::Player2 => 2,
        }
    }

    pub const fn from_wire(value: u8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Player1),
            2 => Some(Cell::Player2),
            _ => None,
        }
    }

    /// Any owned state counts as alive for the automaton rule.
    pub const fn is_alive(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// The player owning this cell, if any.
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::One),
            Cell::Player2 => Some(Player::Two),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.wire())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Cell::from_wire(value).ok_or_else(|| D::Error::custom(format!("invalid cell value {value}")))
    }
}

/// One of the two participants. Connection index 0 is always `One`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Map a connection index (arrival order) to a player. Anything other
    /// than 0 is the second player; callers only ever hold indices 0 and 1.
    pub const fn from_index(index: usize) -> Player {
        if index == 0 { Player::One } else { Player::Two }
    }

    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value this player's pieces take on the board.
    pub const fn cell(self) -> Cell {
        match self {
            Player::One => Cell::Player1,
            Player::Two => Cell::Player2,
        }
    }

    /// Integer id used on the wire (same numbering as the owned cell).
    pub const fn wire(self) -> u8 {
        self.cell().wire()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player{}", self.wire())
    }
}

impl Serialize for Player {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.wire())
    }
}

impl<'de> Deserialize<'de> for Player {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Cell::from_wire(value)
            .and_then(Cell::owner)
            .ok_or_else(|| D::Error::custom(format!("invalid player id {value}")))
    }
}

/// A board coordinate, `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<Pos> for (i32, i32) {
    fn from(pos: Pos) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Full board snapshot as exchanged on the wire, row-major.
pub type Board = Vec<Vec<Cell>>;

/// Live-cell totals per player, serialized as `{"1": n, "2": n}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    #[serde(rename = "1")]
    pub player1: usize,
    #[serde(rename = "2")]
    pub player2: usize,
}

impl CellCounts {
    pub fn of(&self, player: Player) -> usize {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_wire_values() {
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Cell::Player1).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Cell::Player2).unwrap(), "2");
        assert!(serde_json::from_str::<Cell>("3").is_err());
        assert!(serde_json::from_str::<Cell>("-1").is_err());
    }

    #[test]
    fn player_mapping() {
        assert_eq!(Player::from_index(0), Player::One);
        assert_eq!(Player::from_index(1), Player::Two);
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.cell(), Cell::Player2);
        assert_eq!(Cell::Player1.owner(), Some(Player::One));
        assert_eq!(Cell::Empty.owner(), None);
        assert_eq!(serde_json::to_string(&Player::Two).unwrap(), "2");
        assert!(serde_json::from_str::<Player>("0").is_err());
    }

    #[test]
    fn pos_is_a_two_element_array() {
        assert_eq!(serde_json::to_string(&Pos::new(4, -1)).unwrap(), "[4,-1]");
        let pos: Pos = serde_json::from_str("[2, 5]").unwrap();
        assert_eq!(pos, Pos::new(2, 5));
        assert!(serde_json::from_str::<Pos>("[2]").is_err());
        assert!(serde_json::from_str::<Pos>("[2, \"x\"]").is_err());
        assert!(serde_json::from_str::<Pos>("[1.5, 2]").is_err());
    }

    #[test]
    fn counts_use_numeric_keys() {
        let counts = CellCounts {
            player1: 4,
            player2: 7,
        };
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"1":4,"2":7}"#
        );
        assert_eq!(counts.of(Player::Two), 7);
    }
}
