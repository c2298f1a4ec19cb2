//! Initiative: 1d10 plus the Agility bonus.

use dh_core::characteristic::bonus;
use serde::{Deserialize, Serialize};

/// The formula rolled for initiative before the bonus is added.
pub const INITIATIVE_FORMULA: &str = "1d10";

/// A resolved initiative roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    /// The d10 result.
    pub die: i32,
    /// Agility bonus (tens digit of Agility).
    pub bonus: i32,
    /// Die plus bonus.
    pub total: i32,
}

impl Initiative {
    /// Combine a d10 result with an Agility value.
    pub fn new(die: i32, agility: i32) -> Self {
        let bonus = bonus(agility);
        Self {
            die,
            bonus,
            total: die + bonus,
        }
    }
}
