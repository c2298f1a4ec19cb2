//! Test difficulty modifiers.
//!
//! Tests are modified in steps of ten between -60 and +60, which gives
//! exactly thirteen choices.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Smallest offered modifier.
pub const MIN: i32 = -60;
/// Largest offered modifier.
pub const MAX: i32 = 60;
/// Distance between offered modifiers.
pub const STEP: i32 = 10;

/// One of the thirteen offered test modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TestModifier(i32);

impl TestModifier {
    /// Validate a raw modifier value.
    pub fn new(value: i32) -> MechResult<Self> {
        if (MIN..=MAX).contains(&value) && value % STEP == 0 {
            Ok(Self(value))
        } else {
            Err(MechError::InvalidModifier(value.to_string()))
        }
    }

    /// All offered modifiers, from -60 to +60.
    pub fn choices() -> impl Iterator<Item = TestModifier> {
        (0..=(MAX - MIN) / STEP).map(|i| Self(MIN + i * STEP))
    }

    /// The modifier value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Signed label used as the choice id (`-20`, `0`, `+30`).
    pub fn id(self) -> String {
        if self.0 > 0 {
            format!("+{}", self.0)
        } else {
            self.0.to_string()
        }
    }

    /// Parse a choice id back into a modifier.
    pub fn parse(id: &str) -> MechResult<Self> {
        let trimmed = id.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let value = digits
            .parse::<i32>()
            .map_err(|_| MechError::InvalidModifier(id.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<i32> for TestModifier {
    type Error = MechError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TestModifier> for i32 {
    fn from(modifier: TestModifier) -> Self {
        modifier.0
    }
}

impl std::fmt::Display for TestModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
