//! Scoring categories.
//!
//! Every category is the pairing of two independent strategies:
//! - an [`Eligibility`] test deciding whether the combination qualifies, and
//! - a [`Value`] function computing the score when it does.
//!
//! `measure = if matches { value } else { 0 }`. A non-match scoring zero is a normal
//! outcome, not an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combination::{Combination, CombinationError, FaceCounts, DICE_FACES, NUM_FACES};

pub const NUM_CATEGORIES: usize = 12;

/// Fixed category catalogue, in scoreboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Aces,
    Deuces,
    Threes,
    Fours,
    Fives,
    Sixs,
    Choice,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yacht,
}

/// When a combination qualifies for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Always,
    /// Some face appears at least `n` times.
    CountAtLeast(u8),
    /// Contains (as a sub-multiset) at least one template of the set.
    ContainsAnyTemplate(TemplateSet),
    /// Distinct faces' multiplicities, sorted ascending, equal this partition exactly.
    ExactPartition(&'static [u8]),
    AllEqual,
}

/// Templates tried by [`Eligibility::ContainsAnyTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSet {
    /// Every window of `len` consecutive faces inside 1..=6.
    Straights { len: usize },
    /// Explicit face lists. A list with a face outside 1..=6 never matches.
    Faces(&'static [&'static [u8]]),
}

impl TemplateSet {
    /// True if `counts` contains at least one template of the set.
    pub fn any_contained_in(self, counts: &FaceCounts) -> bool {
        match self {
            TemplateSet::Straights { len } => {
                straight_templates(len).any(|t| contains_template(counts, &t))
            }
            TemplateSet::Faces(lists) => lists
                .iter()
                .filter_map(|faces| Template::from_faces(faces).ok())
                .any(|t| contains_template(counts, &t)),
        }
    }
}

/// What a qualifying combination is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Fixed(u32),
    SumAll,
    SumOfFace(u8),
}

impl Category {
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Aces,
        Category::Deuces,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixs,
        Category::Choice,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
    ];

    pub const UPPER_SECTION: [Category; 6] = [
        Category::Aces,
        Category::Deuces,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixs,
    ];

    pub const LOWER_SECTION: [Category; 6] = [
        Category::Choice,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
    ];

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Aces => "Aces",
            Category::Deuces => "Deuces",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixs => "Sixs",
            Category::Choice => "Choice",
            Category::FourOfAKind => "FourOfAKind",
            Category::FullHouse => "FullHouse",
            Category::SmallStraight => "SmallStraight",
            Category::LargeStraight => "LargeStraight",
            Category::Yacht => "Yacht",
        }
    }

    /// Face value for upper-section categories.
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    pub fn is_upper(self) -> bool {
        self.index() < Category::UPPER_SECTION.len()
    }

    pub fn eligibility(self) -> Eligibility {
        match self {
            Category::Aces
            | Category::Deuces
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixs
            | Category::Choice => Eligibility::Always,
            Category::FourOfAKind => Eligibility::CountAtLeast(4),
            Category::FullHouse => Eligibility::ExactPartition(&[2, 3]),
            Category::SmallStraight => {
                Eligibility::ContainsAnyTemplate(TemplateSet::Straights { len: 4 })
            }
            Category::LargeStraight => {
                Eligibility::ContainsAnyTemplate(TemplateSet::Straights { len: 5 })
            }
            Category::Yacht => Eligibility::AllEqual,
        }
    }

    pub fn value(self) -> Value {
        match self {
            Category::Aces => Value::SumOfFace(1),
            Category::Deuces => Value::SumOfFace(2),
            Category::Threes => Value::SumOfFace(3),
            Category::Fours => Value::SumOfFace(4),
            Category::Fives => Value::SumOfFace(5),
            Category::Sixs => Value::SumOfFace(6),
            Category::Choice | Category::FourOfAKind | Category::FullHouse => Value::SumAll,
            Category::SmallStraight => Value::Fixed(15),
            Category::LargeStraight => Value::Fixed(30),
            Category::Yacht => Value::Fixed(50),
        }
    }

    pub fn matches(self, combination: &Combination) -> bool {
        self.eligibility().test(&combination.counts())
    }

    /// Score for `combination`: 0 unless it matches.
    pub fn measure(self, combination: &Combination) -> u32 {
        if !self.matches(combination) {
            return 0;
        }
        self.value().eval(combination)
    }

    /// Like [`Category::matches`], validating raw dice first.
    pub fn try_matches(self, dice: &[u8]) -> Result<bool, CombinationError> {
        Ok(self.matches(&Combination::try_from(dice)?))
    }

    /// Like [`Category::measure`], validating raw dice first.
    pub fn try_measure(self, dice: &[u8]) -> Result<u32, CombinationError> {
        Ok(self.measure(&Combination::try_from(dice)?))
    }
}

impl Eligibility {
    pub fn test(self, counts: &FaceCounts) -> bool {
        match self {
            Eligibility::Always => true,
            Eligibility::CountAtLeast(n) => counts.iter().any(|&c| c >= n),
            Eligibility::ContainsAnyTemplate(set) => set.any_contained_in(counts),
            Eligibility::ExactPartition(parts) => {
                if parts.len() > NUM_FACES {
                    return false;
                }
                let mut sorted = *counts;
                sorted.sort_unstable();
                let (absent, present) = sorted.split_at(NUM_FACES - parts.len());
                absent.iter().all(|&c| c == 0) && present == parts
            }
            Eligibility::AllEqual => counts.iter().filter(|&&c| c > 0).count() == 1,
        }
    }
}

impl Value {
    pub fn eval(self, combination: &Combination) -> u32 {
        match self {
            Value::Fixed(n) => n,
            Value::SumAll => combination.sum(),
            Value::SumOfFace(face) => combination.count_of(face) as u32 * face as u32,
        }
    }
}

/// A small multiset of required faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    counts: FaceCounts,
}

impl Template {
    pub fn from_faces(faces: &[u8]) -> Result<Self, CombinationError> {
        let mut counts = [0u8; NUM_FACES];
        for (index, &value) in faces.iter().enumerate() {
            if !DICE_FACES.contains(&value) {
                return Err(CombinationError::DieOutOfRange { index, value });
            }
            counts[(value - 1) as usize] = counts[(value - 1) as usize].saturating_add(1);
        }
        Ok(Self { counts })
    }
}

/// Sub-multiset test: `counts` holds at least as many copies of every face as `template` needs.
pub fn contains_template(counts: &FaceCounts, template: &Template) -> bool {
    template.counts.iter().zip(counts).all(|(need, have)| have >= need)
}

/// All windows of `len` consecutive faces inside 1..=6. Empty when `len` is 0 or exceeds 6.
pub fn straight_templates(len: usize) -> impl Iterator<Item = Template> {
    let starts = if len == 0 || len > NUM_FACES {
        0
    } else {
        NUM_FACES - len + 1
    };
    (0..starts).map(move |start| {
        let mut counts = [0u8; NUM_FACES];
        for c in &mut counts[start..start + len] {
            *c = 1;
        }
        Template { counts }
    })
}

/// Every category's score for one combination, in [`Category::ALL`] order.
pub fn scores_for_combination(combination: &Combination) -> [u32; NUM_CATEGORIES] {
    let mut out = [0u32; NUM_CATEGORIES];
    for cat in Category::ALL {
        out[cat.index()] = cat.measure(combination);
    }
    out
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

/// Accepts the label in any case, with or without `_`/`-` separators (`full_house`, `FullHouse`).
impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Category::ALL
            .into_iter()
            .find(|cat| cat.label().to_ascii_lowercase() == norm)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
