//! Roll-under percentile tests with degrees of success and failure.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A percentile test against a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentileTest {
    /// The characteristic value being tested.
    pub base: i32,
    /// Difficulty modifier added to the base.
    pub modifier: i32,
}

/// The resolved result of a percentile test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// The d100 result.
    pub roll: i32,
    /// Base plus modifier.
    pub target: i32,
    /// Whether the roll was at or under the target.
    pub success: bool,
    /// Degrees of success or failure, always at least 1.
    pub degrees: u32,
}

impl PercentileTest {
    /// Create a test for a base value and modifier.
    pub fn new(base: i32, modifier: i32) -> Self {
        Self { base, modifier }
    }

    /// The number to roll at or under.
    pub fn target(&self) -> i32 {
        self.base.saturating_add(self.modifier)
    }

    /// Resolve a d100 roll against the target.
    pub fn resolve(&self, roll: i32) -> MechResult<TestOutcome> {
        if !(1..=100).contains(&roll) {
            return Err(MechError::RollOutOfRange(roll));
        }
        let target = self.target();
        let success = roll <= target;
        let margin = if success {
            i64::from(target) - i64::from(roll)
        } else {
            i64::from(roll) - i64::from(target)
        };
        let degrees = 1 + u32::try_from(margin / 10).unwrap_or(u32::MAX - 1);
        Ok(TestOutcome {
            roll,
            target,
            success,
            degrees,
        })
    }
}

impl TestOutcome {
    /// "Success" or "Failure".
    pub fn verdict(&self) -> &'static str {
        if self.success { "Success" } else { "Failure" }
    }
}

impl std::fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = if self.degrees == 1 { "degree" } else { "degrees" };
        write!(f, "{} ({} {unit})", self.verdict(), self.degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn success_below_target() {
        let test = PercentileTest::new(40, 10);
        let outcome = test.resolve(35).unwrap();
        assert_eq!(outcome.target, 50);
        assert!(outcome.success);
        assert_eq!(outcome.degrees, 2);
    }

    #[test]
    fn failure_above_target() {
        let outcome = PercentileTest::new(40, 10).resolve(65).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.degrees, 2);
    }

    #[test]
    fn roll_equal_to_target_succeeds() {
        let outcome = PercentileTest::new(40, 0).resolve(40).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.degrees, 1);
    }

    #[test]
    fn one_over_target_is_one_degree_of_failure() {
        let outcome = PercentileTest::new(40, 0).resolve(41).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.degrees, 1);
    }

    #[test]
    fn negative_target_always_fails() {
        let outcome = PercentileTest::new(20, -60).resolve(1).unwrap();
        assert_eq!(outcome.target, -40);
        assert!(!outcome.success);
        assert_eq!(outcome.degrees, 5);
    }

    #[test]
    fn target_over_hundred() {
        let outcome = PercentileTest::new(90, 60).resolve(100).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.degrees, 6);
    }

    #[test]
    fn rejects_out_of_range_roll() {
        let test = PercentileTest::new(40, 0);
        assert_eq!(test.resolve(0), Err(MechError::RollOutOfRange(0)));
        assert_eq!(test.resolve(101), Err(MechError::RollOutOfRange(101)));
    }

    #[test]
    fn display() {
        let outcome = PercentileTest::new(40, 10).resolve(35).unwrap();
        assert_eq!(outcome.to_string(), "Success (2 degrees)");
        let outcome = PercentileTest::new(40, 0).resolve(45).unwrap();
        assert_eq!(outcome.to_string(), "Failure (1 degree)");
    }

    proptest! {
        #[test]
        fn success_iff_roll_at_or_under_target(
            base in 0i32..=100,
            step in 0i32..13,
            roll in 1i32..=100,
        ) {
            let modifier = -60 + step * 10;
            let outcome = PercentileTest::new(base, modifier).resolve(roll).unwrap();
            prop_assert_eq!(outcome.target, base + modifier);
            prop_assert_eq!(outcome.success, roll <= base + modifier);
            prop_assert!(outcome.degrees >= 1);
            let margin = (base + modifier - roll).unsigned_abs();
            prop_assert_eq!(outcome.degrees, 1 + margin / 10);
        }
    }
}
