//! Resolution of characteristic tests.
//!
//! A test rolls d100 against a target of characteristic plus modifier.
//! Rolling at or under the target succeeds; either way the outcome carries
//! degrees, one per full ten points of margin plus one.

pub mod percentile;

pub use percentile::{PercentileTest, TestOutcome};

/// The formula every characteristic test rolls.
pub const TEST_FORMULA: &str = "1d100";
