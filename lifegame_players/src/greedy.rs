// One-ply greedy placement.
//
// Every empty cell is tried as our next placement; the hypothetical board is
// run through the full simulation batch and scored as our live cells minus
// the opponent's. The opponent's reply is not considered. Candidates are
// scored in parallel with one `Evaluator` and one scratch field per rayon
// worker. The winner is the first candidate in scanline order with the
// highest score, so the result does not depend on scheduling.

use lifegame_engine::{Evaluator, Field, Strategy, StrategyError, first_empty};
use lifegame_protocol::{Player, Pos};
use rayon::prelude::*;
use tracing::debug;

pub const GREEDY_NAME: &str = "greed-lifegame-player";

pub struct Greedy {
    name: String,
    generations: u32,
}

impl Greedy {
    pub fn new(generations: u32) -> Self {
        Self {
            name: GREEDY_NAME.into(),
            generations,
        }
    }
}

/// Index and value of the first strict maximum.
pub(crate) fn first_best<T: PartialOrd + Copy>(scores: &[T]) -> Option<(usize, T)> {
    let mut best: Option<(usize, T)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best
}

impl Strategy for Greedy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError> {
        let candidates: Vec<Pos> = board.empty_cells().collect();
        let generations = self.generations;
        let scores: Vec<i32> = candidates
            .par_iter()
            .map_init(
                || (Evaluator::new(generations), board.clone()),
                |(eval, scratch), &pos| {
                    scratch.place(me.cell(), pos);
                    let score = eval.score(scratch, me);
                    scratch.retract(pos);
                    score
                },
            )
            .collect();

        match first_best(&scores) {
            Some((i, score)) => {
                debug!(pos = %candidates[i], score, "greedy choice");
                Ok(candidates[i])
            }
            None => first_empty(board),
        }
    }
}
