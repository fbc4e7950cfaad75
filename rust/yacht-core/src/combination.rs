//! Five-dice combinations.
//!
//! A `Combination` is validated once at construction: exactly five dice, each in 1..=6.
//! Everything downstream (categories, scoreboard) relies on that and never re-checks.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of dice in a combination.
pub const COMBINATION_LEN: usize = 5;

/// Die faces.
pub const DICE_FACES: RangeInclusive<u8> = 1..=6;

/// Number of distinct faces.
pub const NUM_FACES: usize = 6;

/// Multiplicity per face; index 0 is face 1.
pub type FaceCounts = [u8; NUM_FACES];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinationError {
    #[error("combination must have exactly 5 dice, got {got}")]
    Length { got: usize },
    #[error("die {index} has value {value}, expected 1..=6")]
    DieOutOfRange { index: usize, value: u8 },
}

/// The 5 dice scored in one turn. Order is kept for display but is irrelevant to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Combination {
    dice: [u8; COMBINATION_LEN],
}

impl Combination {
    pub fn new(dice: [u8; COMBINATION_LEN]) -> Result<Self, CombinationError> {
        for (index, &value) in dice.iter().enumerate() {
            if !DICE_FACES.contains(&value) {
                return Err(CombinationError::DieOutOfRange { index, value });
            }
        }
        Ok(Self { dice })
    }

    /// Dice in the order they were supplied.
    pub fn dice(&self) -> [u8; COMBINATION_LEN] {
        self.dice
    }

    pub fn sorted(&self) -> [u8; COMBINATION_LEN] {
        let mut out = self.dice;
        out.sort_unstable();
        out
    }

    pub fn counts(&self) -> FaceCounts {
        let mut counts = [0u8; NUM_FACES];
        for &d in &self.dice {
            counts[(d - 1) as usize] += 1;
        }
        counts
    }

    pub fn count_of(&self, face: u8) -> u8 {
        self.dice.iter().filter(|&&d| d == face).count() as u8
    }

    pub fn sum(&self) -> u32 {
        self.dice.iter().map(|&d| d as u32).sum()
    }
}

impl TryFrom<&[u8]> for Combination {
    type Error = CombinationError;

    fn try_from(dice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; COMBINATION_LEN] = dice
            .try_into()
            .map_err(|_| CombinationError::Length { got: dice.len() })?;
        Combination::new(arr)
    }
}

impl TryFrom<Vec<u8>> for Combination {
    type Error = CombinationError;

    fn try_from(dice: Vec<u8>) -> Result<Self, Self::Error> {
        Combination::try_from(dice.as_slice())
    }
}

impl TryFrom<[u8; COMBINATION_LEN]> for Combination {
    type Error = CombinationError;

    fn try_from(dice: [u8; COMBINATION_LEN]) -> Result<Self, Self::Error> {
        Combination::new(dice)
    }
}

impl From<Combination> for Vec<u8> {
    fn from(c: Combination) -> Self {
        c.dice.to_vec()
    }
}

/// Renders dice ascending, e.g. `1, 1, 3, 4, 5`.
impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.sorted().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Iterate all 6^5 ordered hands. Used by exhaustive tests and benches.
pub fn all_combinations() -> impl Iterator<Item = Combination> {
    (0..7776u32).map(|mut n| {
        let mut dice = [0u8; COMBINATION_LEN];
        for d in &mut dice {
            *d = (n % 6) as u8 + 1;
            n /= 6;
        }
        Combination { dice }
    })
}
