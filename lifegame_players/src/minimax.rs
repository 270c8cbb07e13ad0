// Minimax search with alpha-beta pruning.
//
// The root tries every empty cell as our placement. Each root move is searched
// with its own fresh (-inf, +inf) window, alternating the opponent
// (minimising) and us (maximising) for `depth - 1` more plies. Leaves, and
// nodes where the board is full, are scored with the full simulation batch as
// our live cells minus the opponent's. The opponent is modelled as minimising
// that same differential, i.e. the game is treated as zero-sum.
//
// Because root windows are independent, root moves are searched in parallel;
// each rayon worker owns a scratch field and an `Evaluator`. Below the root
// the search runs on the scratch field with place/retract undo, and move
// lists live in `SmallVec`s sized for typical boards. The chosen move is the
// first strict maximum in scanline order.
//
// The search ignores the placement quota: it may look further ahead than the
// number of placements actually left. Depth 2 (our move plus the reply) is
// the plain minimax player; the default depth 3 adds our next move.

use lifegame_engine::{Evaluator, Field, Strategy, StrategyError, first_empty};
use lifegame_protocol::{Player, Pos};
use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::debug;

use crate::greedy::first_best;

pub const MINIMAX_NAME: &str = "minimax-lifegame-player-ab";
pub const DEFAULT_DEPTH: u32 = 3;

type MoveList = SmallVec<[Pos; 64]>;

pub struct Minimax {
    name: String,
    depth: u32,
    generations: u32,
}

impl Minimax {
    /// `depth` counts plies including our root move and is clamped to at
    /// least 1 (one-ply greedy).
    pub fn new(depth: u32, generations: u32) -> Self {
        Self {
            name: MINIMAX_NAME.into(),
            depth: depth.max(1),
            generations,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError> {
        let roots: Vec<Pos> = board.empty_cells().collect();
        let depth = self.depth;
        let generations = self.generations;
        let scores: Vec<i32> = roots
            .par_iter()
            .map_init(
                || Search {
                    field: board.clone(),
                    eval: Evaluator::new(generations),
                    me,
                },
                |search, &pos| {
                    search.field.place(me.cell(), pos);
                    let score = search.alphabeta(depth - 1, false, i32::MIN, i32::MAX);
                    search.field.retract(pos);
                    score
                },
            )
            .collect();

        match first_best(&scores) {
            Some((i, score)) => {
                debug!(pos = %roots[i], score, depth, "minimax choice");
                Ok(roots[i])
            }
            None => first_empty(board),
        }
    }
}

/// Per-worker search state.
struct Search {
    field: Field,
    eval: Evaluator,
    me: Player,
}

impl Search {
    fn alphabeta(&mut self, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        if depth == 0 || self.field.is_full() {
            return self.eval.score(&self.field, self.me);
        }
        let mover = if maximizing { self.me } else { self.me.opponent() };
        let moves: MoveList = self.field.empty_cells().collect();

        if maximizing {
            let mut best = i32::MIN;
            for pos in moves {
                self.field.place(mover.cell(), pos);
                let value = self.alphabeta(depth - 1, false, alpha, beta);
                self.field.retract(pos);
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for pos in moves {
                self.field.place(mover.cell(), pos);
                let value = self.alphabeta(depth - 1, true, alpha, beta);
                self.field.retract(pos);
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
