// Placement strategy capability.
//
// A `Strategy` is the client's decision point: given the mirror board and the
// identity the client is playing as, return a coordinate. The client runtime
// (`lifegame_server::client`) holds one as `&mut dyn Strategy` and calls it
// once per `placement` prompt. Variants are plain structs implementing the
// trait (see `lifegame_players`); there is no base type to inherit from.
//
// A strategy that returns an occupied or out-of-range cell is not an error
// here. The server will reject it and the client forfeits.

use std::io;

use derive_more::{Display, Error};
use lifegame_protocol::{Player, Pos};

use crate::field::Field;

#[derive(Debug, Display, Error)]
pub enum StrategyError {
    #[display("no empty cell left to place on")]
    NoEmptyCell,
    #[display("placement input closed")]
    InputClosed,
    #[display("placement input failed: {source}")]
    Io { source: io::Error },
}

impl From<io::Error> for StrategyError {
    fn from(source: io::Error) -> Self {
        StrategyError::Io { source }
    }
}

pub trait Strategy {
    /// Display name sent to the server during the handshake.
    fn name(&self) -> &str;

    /// Pick the next cell to occupy on `board`, playing as `me`.
    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError> {
        (**self).choose_placement(board, me)
    }
}

/// The first empty cell in scanline order.
pub fn first_empty(board: &Field) -> Result<Pos, StrategyError> {
    board.empty_cells().next().ok_or(StrategyError::NoEmptyCell)
}

/// Takes the first empty cell in scanline order every time.
#[derive(Clone, Debug)]
pub struct Scanline {
    name: String,
}

impl Scanline {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Scanline {
    fn default() -> Self {
        Self::new("scanline")
    }
}

impl Strategy for Scanline {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, _me: Player) -> Result<Pos, StrategyError> {
        first_empty(board)
    }
}
