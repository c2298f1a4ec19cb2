//! Error types for the rules engine.

use dh_core::Characteristic;

/// Errors that can occur while parsing a dice formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The formula string is empty.
    #[error("empty dice formula")]
    Empty,

    /// A character that does not belong in a formula.
    #[error("unexpected '{found}' at position {position}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Byte offset in the normalized formula.
        position: usize,
    },

    /// A number was expected but the formula ended or had something else.
    #[error("expected a number at position {0}")]
    ExpectedNumber(usize),

    /// A number does not fit the allowed range.
    #[error("number too large at position {0}")]
    NumberTooLarge(usize),

    /// Dice count outside 1..=100.
    #[error("dice count must be between 1 and 100, got {0}")]
    InvalidDiceCount(u32),

    /// Die size outside 2..=1000.
    #[error("die size must be between 2 and 1000, got {0}")]
    InvalidDieSize(u32),

    /// Keep count outside 1..=count.
    #[error("cannot keep {keep} of {count} dice")]
    InvalidKeep {
        /// Requested number of dice to keep.
        keep: u32,
        /// Dice in the term.
        count: u32,
    },
}

/// Errors that can occur during rules operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// A dice formula could not be parsed.
    #[error("invalid formula \"{formula}\": {source}")]
    Formula {
        /// The formula as given.
        formula: String,
        /// What was wrong with it.
        source: FormulaError,
    },

    /// A percentile roll outside 1..=100.
    #[error("percentile roll out of range: {0}")]
    RollOutOfRange(i32),

    /// A test modifier that is not one of the offered steps.
    #[error("invalid test modifier: {0}")]
    InvalidModifier(String),

    /// An unknown generation mode identifier.
    #[error("unknown generation mode: {0}")]
    UnknownMode(String),

    /// Point-buy increment with no points left.
    #[error("no points left to spend")]
    PoolExhausted,

    /// Point-buy increment at the ceiling.
    #[error("{0} is already at the ceiling")]
    AtCeiling(Characteristic),

    /// Point-buy decrement at the starting floor.
    #[error("{0} is already at its starting value")]
    AtFloor(Characteristic),

    /// Point-buy commit before the pool is spent exactly.
    #[error("{remaining} points left to spend")]
    PoolNotSpent {
        /// Points still in the pool.
        remaining: i32,
    },
}

/// Convenience result type for rules operations.
pub type MechResult<T> = Result<T, MechError>;
