// Monte Carlo placement.
//
// For each empty cell, in scanline order, we place our cell there and run
// `playouts` random completions of the placement phase: the remaining
// placements (twice the quota minus the live cells already on the board)
// are made on shuffled empty cells, alternating from the opponent. Each
// completed board goes through the simulation batch and the winner is
// decided as the server does it, ties to Player One. The candidate with the
// most wins is chosen; the first one wins ties.
//
// Randomness: every call draws one `u64` from the strategy's generator and
// builds a per-call base `GameRng` from it. Candidate `i` plays out with
// `base.fork(i)`, so results are identical whether candidates run on one
// thread or many.

use lifegame_engine::{Evaluator, Field, Strategy, StrategyError, first_empty};
use lifegame_prng::GameRng;
use lifegame_protocol::{Player, Pos};
use rayon::prelude::*;
use tracing::debug;

use crate::greedy::first_best;

pub const MONTECARLO_NAME: &str = "montecarlo-lifegame-player";
pub const DEFAULT_PLAYOUTS: u32 = 100;

pub struct MonteCarlo {
    name: String,
    playouts: u32,
    quota: u32,
    generations: u32,
    rng: GameRng,
}

impl MonteCarlo {
    pub fn new(seed: u64, playouts: u32, quota: u32, generations: u32) -> Self {
        Self {
            name: MONTECARLO_NAME.into(),
            playouts,
            quota,
            generations,
            rng: GameRng::new(seed),
        }
    }
}

/// Per-worker playout state.
struct Playout {
    scratch: Field,
    empties: Vec<Pos>,
    eval: Evaluator,
}

impl Playout {
    /// Complete the placement phase at random from `start` and return the
    /// winner after simulation.
    fn run(&mut self, start: &Field, remaining: usize, first_mover: Player, rng: &mut GameRng) -> Player {
        self.scratch.copy_from(start);
        self.empties.clear();
        self.empties.extend(start.empty_cells());
        rng.shuffle(&mut self.empties);

        let mut mover = first_mover;
        for _ in 0..remaining {
            let Some(pos) = self.empties.pop() else {
                break;
            };
            self.scratch.place(mover.cell(), pos);
            mover = mover.opponent();
        }
        self.eval.winner(&self.scratch)
    }
}

impl Strategy for MonteCarlo {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError> {
        let candidates: Vec<Pos> = board.empty_cells().collect();
        let base = GameRng::new(self.rng.next_u64());
        let playouts = self.playouts;
        let generations = self.generations;
        let total = 2 * self.quota as usize;

        let wins: Vec<u32> = candidates
            .par_iter()
            .enumerate()
            .map_init(
                || {
                    (
                        board.clone(),
                        Playout {
                            scratch: Field::default(),
                            empties: Vec::new(),
                            eval: Evaluator::new(generations),
                        },
                    )
                },
                |(with_move, playout), (i, &pos)| {
                    with_move.place(me.cell(), pos);
                    let live = with_move.counts();
                    let remaining = total.saturating_sub(live.player1 + live.player2);
                    let mut rng = base.fork(i as u64);
                    let mut won = 0;
                    for _ in 0..playouts {
                        if playout.run(with_move, remaining, me.opponent(), &mut rng) == me {
                            won += 1;
                        }
                    }
                    with_move.retract(pos);
                    won
                },
            )
            .collect();

        match first_best(&wins) {
            Some((i, won)) => {
                debug!(pos = %candidates[i], won, playouts, "monte carlo choice");
                Ok(candidates[i])
            }
            None => first_empty(board),
        }
    }
}
