//! Dice oracle backed by the formula roller.

use async_trait::async_trait;
use dh_mechanics::{DiceFormula, MechError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::error::{PortError, PortResult};
use crate::ports::{DiceOracle, Evaluation};

/// A dice oracle with a seeded RNG.
#[derive(Debug)]
pub struct SeededDice {
    rng: Mutex<StdRng>,
}

impl SeededDice {
    /// Create an oracle whose rolls are reproducible for the seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl DiceOracle for SeededDice {
    async fn evaluate(&self, formula: &str) -> PortResult<Evaluation> {
        let parsed = DiceFormula::parse(formula).map_err(|e| PortError::Evaluation {
            formula: formula.to_string(),
            message: match e {
                MechError::Formula { source, .. } => source.to_string(),
                other => other.to_string(),
            },
        })?;
        let roll = parsed.roll(&mut *self.rng.lock().await);
        Ok(Evaluation {
            formula: roll.formula,
            total: roll.total,
            breakdown: roll.dice,
        })
    }
}
