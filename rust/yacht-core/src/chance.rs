//! Combination supplier.
//!
//! Two modes:
//! - `Deterministic`: dice are a pure function of (seed, roll_idx), independent of any
//!   evolving RNG state, so a replay with the same seed sees the same combinations.
//! - `Rng`: a seeded ChaCha8 stream.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::combination::{Combination, COMBINATION_LEN, DICE_FACES};

/// Roll 5 uniform dice.
pub fn roll<R: Rng>(rng: &mut R) -> Combination {
    let mut dice = [0u8; COMBINATION_LEN];
    for d in &mut dice {
        *d = rng.gen_range(DICE_FACES);
    }
    Combination::new(dice).unwrap_or_else(|_| unreachable!("gen_range stays within 1..=6"))
}

/// SplitMix64 step.
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(seed: u64, roll_idx: u64) -> u64 {
    let mut s = seed ^ roll_idx.wrapping_mul(0xD6E8FEB86659FD93);
    splitmix64_next(&mut s)
}

/// Deterministic combination for `(seed, roll_idx)`.
pub fn roll_keyed(seed: u64, roll_idx: u64) -> Combination {
    let mut state = mix_seed(seed, roll_idx);
    let mut dice = [0u8; COMBINATION_LEN];
    for d in &mut dice {
        let r = splitmix64_next(&mut state);
        *d = ((r % 6) + 1) as u8;
    }
    Combination::new(dice).unwrap_or_else(|_| unreachable!("r % 6 + 1 stays within 1..=6"))
}

pub enum ChanceMode {
    Deterministic { seed: u64 },
    Rng { rng: Box<ChaCha8Rng> },
}

/// Stateful supplier: hands out one combination per call.
pub struct Roller {
    mode: ChanceMode,
    rolls: u64,
}

impl Roller {
    pub fn new_deterministic(seed: u64) -> Self {
        Self {
            mode: ChanceMode::Deterministic { seed },
            rolls: 0,
        }
    }

    pub fn new_rng(seed: u64) -> Self {
        Self {
            mode: ChanceMode::Rng {
                rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
            },
            rolls: 0,
        }
    }

    /// Number of combinations handed out so far.
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn next_combination(&mut self) -> Combination {
        let c = match &mut self.mode {
            ChanceMode::Deterministic { seed } => roll_keyed(*seed, self.rolls),
            ChanceMode::Rng { rng } => roll(rng.as_mut()),
        };
        self.rolls += 1;
        c
    }
}

impl Iterator for Roller {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        Some(self.next_combination())
    }
}
