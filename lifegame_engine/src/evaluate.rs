// Reusable simulation scratch space for search strategies.
//
// Greedy, minimax and Monte Carlo all score a hypothetical board by running
// the full simulation batch on it. `Evaluator` keeps two fields and steps
// between them with `Field::next_generation_into`, so after the first call a
// simulation allocates nothing. One evaluator per thread; it is cheap to
// create and not shared.

use lifegame_protocol::{Cell, Player};

use crate::field::Field;

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    generations: u32,
    front: Field,
    back: Field,
}

impl Evaluator {
    pub fn new(generations: u32) -> Self {
        Self {
            generations,
            front: Field::default(),
            back: Field::default(),
        }
    }

    /// Run the simulation batch on a copy of `field` and return the result.
    pub fn simulate(&mut self, field: &Field) -> &Field {
        self.front.copy_from(field);
        for _ in 0..self.generations {
            self.front.next_generation_into(&mut self.back);
            std::mem::swap(&mut self.front, &mut self.back);
        }
        &self.front
    }

    /// Live-cell differential for `me` after the simulation batch.
    pub fn score(&mut self, field: &Field, me: Player) -> i32 {
        let counts = self.simulate(field).counts();
        counts.of(me) as i32 - counts.of(me.opponent()) as i32
    }

    /// Winner after the simulation batch, ties to Player One.
    pub fn winner(&mut self, field: &Field) -> Player {
        let result = self.simulate(field);
        if result.count(Cell::Player2) > result.count(Cell::Player1) {
            Player::Two
        } else {
            Player::One
        }
    }
}
