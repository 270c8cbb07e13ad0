// Seeded random numbers for the arena's bots.
//
// `GameRng` is xoshiro256++ (Blackman & Vigna, 2019) with its 256-bit state
// expanded from a single `u64` by SplitMix64. The random strategy's cell
// order and every Monte Carlo playout draw from it, so a bot started with the
// same seed against the same opponent replays the same game move for move.
//
// Parallel search derives one child generator per candidate move with
// `fork`. A child depends only on the parent's state and the stream number,
// never on which rayon worker runs it.
//
// **Critical constraint: determinism.** Integer arithmetic only; no floats,
// no OS entropy, no stdlib hasher state.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    s: [u64; 4],
}

impl GameRng {
    /// Equal seeds give equal sequences. Zero is a valid seed.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: std::array::from_fn(|_| splitmix64(&mut sm)),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.s;
        let out = s0.wrapping_add(s3).rotate_left(23).wrapping_add(s0);

        let s2 = s2 ^ s0;
        let s3 = s3 ^ s1;
        let s1 = s1 ^ s2;
        let s0 = s0 ^ s3;
        self.s = [s0, s1, s2 ^ (self.s[1] << 17), s3.rotate_left(45)];

        out
    }

    /// A child generator for `stream`. Leaves `self` untouched, so the same
    /// parent and stream always give the same child.
    pub fn fork(&self, stream: u64) -> GameRng {
        let mut sm =
            self.s[0] ^ self.s[2].rotate_left(17) ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        GameRng::new(splitmix64(&mut sm))
    }

    /// Uniform in `[0, bound)`, without modulo bias.
    ///
    /// Panics if `bound` is 0.
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "GameRng::below: empty range");
        if bound.is_power_of_two() {
            return self.next_u64() & (bound - 1);
        }
        // Values under `zone` would make the low residues more likely.
        let zone = bound.wrapping_neg() % bound;
        loop {
            let draw = self.next_u64();
            if draw >= zone {
                return draw % bound;
            }
        }
    }

    /// Fisher-Yates, back to front.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
