// lifegame_engine: rules and game state for the Life Game Arena.
//
// Everything that decides what happens on the board lives here; nothing here
// touches a socket. The server drives a `GameControl`, the client runtime and
// strategies work on `Field` mirrors.
//
// Module overview:
// - `field.rs`:     Dense 2D grid, the two-player Life transition rule, counts.
// - `control.rs`:   GameControl state machine: turns, quotas, simulation, winner.
// - `config.rs`:    GameConfig (board size, quota, generations, tie-break),
//                   loaded from JSON.
// - `strategy.rs`:  The `Strategy` trait the client runtime calls for moves.
// - `evaluate.rs`:  Double-buffered simulation scratch space for search.
//
// **Critical constraint: determinism.** A generation is a pure function of
// the previous grid. Given the same placements, server and clients compute
// identical boards, which is what lets a client's search predict the result
// the server will broadcast.

pub mod config;
pub mod control;
pub mod evaluate;
pub mod field;
pub mod strategy;

pub use config::{ConfigError, GameConfig, TieBreak};
pub use control::{GameControl, GamePhase, Outcome, Participant, PlacementRejection};
pub use evaluate::Evaluator;
pub use field::{BoardError, Field, MAX_DIMENSION, next_state};
pub use strategy::{Scanline, Strategy, StrategyError, first_empty};

pub use lifegame_protocol::{Board, Cell, CellCounts, Player, Pos};
