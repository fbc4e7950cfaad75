//! yacht-core: Combinations, scoring categories, scoreboard, and configuration.

pub mod category;
pub mod chance;
pub mod combination;
pub mod config;
pub mod scoreboard;

pub use category::{
    contains_template, scores_for_combination, straight_templates, Category, Eligibility,
    ParseCategoryError, Template, TemplateSet, Value, NUM_CATEGORIES,
};
pub use chance::{roll, roll_keyed, ChanceMode, Roller};
pub use combination::{
    all_combinations, Combination, CombinationError, FaceCounts, COMBINATION_LEN, DICE_FACES,
    NUM_FACES,
};
pub use config::{ChanceConfig, ChanceKind, Config, ConfigError, LoggingConfig};
pub use scoreboard::{
    ScoreBoard, ScoreBoardEntry, ScoreBoardError, SharedScoreBoard, UPPER_BONUS,
    UPPER_BONUS_THRESHOLD,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod scoreboard_tests;
