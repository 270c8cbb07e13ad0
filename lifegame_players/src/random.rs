// Uniform random placement.
//
// On the first call (or whenever the board size changes) every coordinate is
// shuffled once with the seeded `GameRng`. Each call then pops coordinates
// off the end until one is empty on the current mirror board. Popped cells
// are never retried, since an occupied cell stays occupied for the rest of
// the placement phase. If the list runs dry the first empty cell in scanline
// order is used.

use lifegame_engine::{Field, Strategy, StrategyError, first_empty};
use lifegame_prng::GameRng;
use lifegame_protocol::{Cell, Player, Pos};

pub const RANDOM_NAME: &str = "random-lifegame-player";

pub struct RandomStrategy {
    name: String,
    rng: GameRng,
    order: Vec<Pos>,
    dims: Option<(usize, usize)>,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            name: RANDOM_NAME.into(),
            rng: GameRng::new(seed),
            order: Vec::new(),
            dims: None,
        }
    }

    fn reshuffle(&mut self, board: &Field) {
        self.order = (0..board.height() as i32)
            .flat_map(|row| (0..board.width() as i32).map(move |col| Pos::new(row, col)))
            .collect();
        self.rng.shuffle(&mut self.order);
        self.dims = Some((board.height(), board.width()));
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, _me: Player) -> Result<Pos, StrategyError> {
        if self.dims != Some((board.height(), board.width())) {
            self.reshuffle(board);
        }
        while let Some(pos) = self.order.pop() {
            if board.get(pos) == Some(Cell::Empty) {
                return Ok(pos);
            }
        }
        first_empty(board)
    }
}
