//! Rules engine for DH2e.
//!
//! Provides dice formulas and rolling, percentile test resolution with
//! degrees of success, test modifiers, characteristic generation (rolled
//! and point-buy), and initiative. Everything here is pure: randomness is
//! injected as a seeded [`rand::rngs::StdRng`].

pub mod dice;
pub mod error;
pub mod generation;
pub mod initiative;
pub mod modifier;
pub mod resolution;

pub use dice::{DiceFormula, DicePool, Die, DieResult, FormulaRoll, RollResult};
pub use error::{FormulaError, MechError, MechResult};
pub use generation::{Bonuses, GenerationMode, PointBuy};
pub use initiative::Initiative;
pub use modifier::TestModifier;
pub use resolution::{PercentileTest, TestOutcome};
