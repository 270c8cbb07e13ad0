// lifegame_players: placement strategies for the Life Game Arena.
//
// Each strategy is a plain struct implementing `lifegame_engine::Strategy`;
// the client runtime (`lifegame_server::client`) drives whichever one the
// player binary was started with.
//
// Module overview:
// - `random.rs`:      Shuffled cell order from a seeded `GameRng`.
// - `greedy.rs`:      One ply: best differential after the simulation batch.
// - `minimax.rs`:     Alpha-beta search over alternating placements.
// - `montecarlo.rs`:  Random playouts of the rest of the placement phase.
// - `manual.rs`:      A human typing coordinates at a terminal.
// - `display.rs`:     Board rendering for the terminal.
//
// Search strategies never copy the board per trial. They keep one scratch
// field per rayon worker, place and retract hypothetical moves on it, and
// score with a reusable `Evaluator`. Every choice is the first best
// candidate in scanline order, so parallelism never changes the answer.

pub mod display;
pub mod greedy;
pub mod manual;
pub mod minimax;
pub mod montecarlo;
pub mod random;

pub use display::{count_line, render_board};
pub use greedy::{GREEDY_NAME, Greedy};
pub use manual::{MANUAL_NAME, Manual};
pub use minimax::{DEFAULT_DEPTH, MINIMAX_NAME, Minimax};
pub use montecarlo::{DEFAULT_PLAYOUTS, MONTECARLO_NAME, MonteCarlo};
pub use random::{RANDOM_NAME, RandomStrategy};
