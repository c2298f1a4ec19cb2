//! Dice types, pools, formulas, and rolling.
//!
//! Supports the standard polyhedral dice plus any custom size, and
//! arithmetic formulas with keep-highest / keep-lowest such as
//! `3d10kh2+20` or `8+1d5`.

pub mod formula;
pub mod pool;
pub mod roll;

pub use formula::{DiceFormula, FormulaRoll, Keep};
pub use pool::DicePool;
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Five-sided die.
    D5,
    /// Six-sided die.
    D6,
    /// Ten-sided die.
    D10,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D5 => 5,
            Self::D6 => 6,
            Self::D10 => 10,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// The die with the given number of sides.
    pub fn from_sides(sides: u32) -> Self {
        match sides {
            5 => Self::D5,
            6 => Self::D6,
            10 => Self::D10,
            20 => Self::D20,
            100 => Self::D100,
            n => Self::Custom(n),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
