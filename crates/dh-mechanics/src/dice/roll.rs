//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

use super::Die;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The type of die that was rolled.
    pub die: Die,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
    /// Whether a keep rule discarded this die from the total.
    #[serde(default)]
    pub dropped: bool,
}

/// The result of rolling a dice pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results, in roll order.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of all kept die values.
    pub fn total(&self) -> u32 {
        self.kept().map(|d| d.value).sum()
    }

    /// Dice that count toward the total.
    pub fn kept(&self) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(|d| !d.dropped)
    }

    /// The highest single kept value, or 0 if empty.
    pub fn highest(&self) -> u32 {
        self.kept().map(|d| d.value).max().unwrap_or(0)
    }

    /// The lowest single kept value, or 0 if empty.
    pub fn lowest(&self) -> u32 {
        self.kept().map(|d| d.value).min().unwrap_or(0)
    }

    /// Keep the `n` highest dice and mark the rest dropped.
    pub fn keep_highest(self, n: usize) -> Self {
        self.keep_by(n, |a, b| b.cmp(&a))
    }

    /// Keep the `n` lowest dice and mark the rest dropped.
    pub fn keep_lowest(self, n: usize) -> Self {
        self.keep_by(n, |a, b| a.cmp(&b))
    }

    fn keep_by(mut self, n: usize, order: impl Fn(u32, u32) -> std::cmp::Ordering) -> Self {
        let mut ranked: Vec<usize> = (0..self.dice.len()).collect();
        // Stable sort: among equal values the earlier die is kept.
        ranked.sort_by(|&a, &b| order(self.dice[a].value, self.dice[b].value));
        for &idx in ranked.iter().skip(n) {
            self.dice[idx].dropped = true;
        }
        self
    }

    /// Number of dice in the result, dropped ones included.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self
            .dice
            .iter()
            .map(|d| {
                if d.dropped {
                    format!("~{}", d.value)
                } else {
                    d.value.to_string()
                }
            })
            .collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}
