//! Per-game scoreboard.
//!
//! One slot per category, filled at most once. Filled entries are never updated or removed.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::category::{Category, NUM_CATEGORIES};
use crate::combination::{Combination, CombinationError};

/// Upper-section total needed for the bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreBoardError {
    #[error("category {category} already has an entry")]
    DuplicateCategory { category: Category },
    #[error(transparent)]
    Combination(#[from] CombinationError),
}

/// A committed (combination, category) pair. The score is computed on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoardEntry {
    combination: Combination,
    category: Category,
    score: u32,
}

impl ScoreBoardEntry {
    pub fn new(combination: Combination, category: Category) -> Self {
        Self {
            combination,
            category,
            score: category.measure(&combination),
        }
    }

    pub fn combination(&self) -> &Combination {
        &self.combination
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    slots: [Option<ScoreBoardEntry>; NUM_CATEGORIES],
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `combination` to `category`.
    ///
    /// Fails with [`ScoreBoardError::DuplicateCategory`] if the slot is already filled;
    /// the board is unchanged in that case.
    pub fn add(
        &mut self,
        combination: Combination,
        category: Category,
    ) -> Result<&ScoreBoardEntry, ScoreBoardError> {
        let slot = &mut self.slots[category.index()];
        if slot.is_some() {
            tracing::warn!(%category, %combination, "rejected duplicate category");
            return Err(ScoreBoardError::DuplicateCategory { category });
        }
        let entry = slot.insert(ScoreBoardEntry::new(combination, category));
        tracing::debug!(%category, %combination, score = entry.score, "committed entry");
        Ok(entry)
    }

    /// Validate raw dice, then [`ScoreBoard::add`].
    pub fn add_dice(
        &mut self,
        dice: &[u8],
        category: Category,
    ) -> Result<&ScoreBoardEntry, ScoreBoardError> {
        let combination = Combination::try_from(dice)?;
        self.add(combination, category)
    }

    pub fn get(&self, category: Category) -> Option<&ScoreBoardEntry> {
        self.slots[category.index()].as_ref()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.slots[category.index()].is_some()
    }

    /// Filled entries in catalogue order.
    pub fn rows(&self) -> impl Iterator<Item = &ScoreBoardEntry> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// All slots filled. Nothing stops callers from reading a partial board.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.contains(c))
    }

    /// Sum of committed upper-section scores; empty slots count as 0.
    pub fn upper_section_total(&self) -> u32 {
        Category::UPPER_SECTION
            .iter()
            .filter_map(|&c| self.get(c))
            .map(ScoreBoardEntry::score)
            .sum()
    }

    pub fn upper_section_bonus(&self) -> u32 {
        if self.upper_section_total() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    /// All committed scores plus the upper-section bonus.
    pub fn score(&self) -> u32 {
        self.rows().map(ScoreBoardEntry::score).sum::<u32>() + self.upper_section_bonus()
    }

    /// Line-oriented listing: upper section, bonus, lower section, total.
    pub fn summary(&self) -> String {
        self.to_string()
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, category: Category) -> fmt::Result {
        write!(f, "{}: ", category.label())?;
        if let Some(entry) = self.get(category) {
            write!(f, "{} ({})", entry.score, entry.combination)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::UPPER_SECTION {
            self.write_row(f, category)?;
        }
        write!(f, "Upper section bonus: ")?;
        let bonus = self.upper_section_bonus();
        if bonus > 0 {
            write!(f, "{bonus}")?;
        }
        writeln!(f)?;
        for category in Category::LOWER_SECTION {
            self.write_row(f, category)?;
        }
        write!(f, "Total: {}", self.score())
    }
}

/// A scoreboard shared across threads.
///
/// Commits are serialized by one lock, so two racing `add`s on the same category
/// yield exactly one entry.
#[derive(Debug, Default)]
pub struct SharedScoreBoard {
    inner: Mutex<ScoreBoard>,
}

impl SharedScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the committed entry.
    pub fn add(
        &self,
        combination: Combination,
        category: Category,
    ) -> Result<ScoreBoardEntry, ScoreBoardError> {
        let mut board = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        board.add(combination, category).copied()
    }

    /// Copy of the current board.
    pub fn snapshot(&self) -> ScoreBoard {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_inner(self) -> ScoreBoard {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
