//! Dice pools: a handful of same-or-mixed dice rolled together.

use rand::Rng;
use rand::rngs::StdRng;

use super::Die;
use super::formula::Keep;
use super::roll::{DieResult, RollResult};

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct DicePool {
    /// The dice in this pool, in roll order.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool of `count` identical dice.
    pub fn of(count: u32, die: Die) -> Self {
        Self::new().add(die, count)
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.dice.extend((0..count).map(|_| die));
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll every die. Nothing is dropped.
    pub fn roll(&self, rng: &mut StdRng) -> RollResult {
        let dice = self
            .dice
            .iter()
            .map(|&die| DieResult {
                die,
                value: rng.random_range(1..=die.sides()),
                dropped: false,
            })
            .collect();
        RollResult { dice }
    }

    /// Roll every die, then apply a keep rule.
    pub fn roll_keeping(&self, rng: &mut StdRng, keep: Option<Keep>) -> RollResult {
        let rolled = self.roll(rng);
        match keep {
            Some(Keep::Highest(n)) => rolled.keep_highest(n as usize),
            Some(Keep::Lowest(n)) => rolled.keep_lowest(n as usize),
            None => rolled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn empty_pool() {
        let pool = DicePool::new();
        assert_eq!(pool.count(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.roll(&mut StdRng::seed_from_u64(1)).total(), 0);
    }

    #[test]
    fn mixed_pool() {
        let pool = DicePool::of(3, Die::D10).add(Die::D5, 1);
        assert_eq!(pool.count(), 4);
        assert_eq!(pool.dice[3], Die::D5);
    }

    #[test]
    fn percentile_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = DicePool::of(50, Die::D100).roll(&mut rng);
        assert_eq!(result.count(), 50);
        assert!(result.dice.iter().all(|d| (1..=100).contains(&d.value) && !d.dropped));
    }

    #[test]
    fn keep_rule_drops_the_rest() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = DicePool::of(3, Die::D10).roll_keeping(&mut rng, Some(Keep::Highest(2)));
        assert_eq!(result.count(), 3);
        assert_eq!(result.kept().count(), 2);
        let dropped: Vec<_> = result.dice.iter().filter(|d| d.dropped).collect();
        assert_eq!(dropped.len(), 1);
        assert!(result.kept().all(|d| d.value >= dropped[0].value));
    }

    #[test]
    fn same_seed_same_roll() {
        let pool = DicePool::of(3, Die::D10);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            pool.roll_keeping(&mut a, Some(Keep::Lowest(2))),
            pool.roll_keeping(&mut b, Some(Keep::Lowest(2)))
        );
    }
}
