//! Characteristic generation for a new character.
//!
//! An origin grants advantage to up to two characteristics and disadvantage
//! to one. Rolled generation turns that into keep-highest / keep-lowest
//! formulas; point-buy turns it into a higher starting floor. A
//! characteristic named in both sets counts as advantaged only.

pub mod point_buy;

pub use point_buy::PointBuy;

use std::collections::BTreeSet;

use dh_core::{Characteristic, OriginProfile};
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Rolled formula for an advantaged characteristic.
pub const ADVANTAGE_FORMULA: &str = "3d10kh2+20";
/// Rolled formula for the disadvantaged characteristic.
pub const DISADVANTAGE_FORMULA: &str = "3d10kl2+20";
/// Rolled formula for every other characteristic.
pub const STANDARD_FORMULA: &str = "2d10+20";
/// Value used when a rolled formula cannot be evaluated.
pub const FALLBACK_VALUE: i32 = 20;
/// No generated characteristic may exceed this.
pub const CEILING: i32 = 40;
/// Point-buy starting value for most characteristics.
pub const BASE_FLOOR: i32 = 25;
/// Point-buy starting value for advantaged characteristics.
pub const ADVANTAGE_FLOOR: i32 = 30;
/// Points to distribute in point-buy.
pub const POINT_POOL: i32 = 60;

/// How characteristics are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Roll every characteristic.
    #[serde(rename = "generate")]
    Randomized,
    /// Distribute a fixed pool of points.
    #[serde(rename = "pointbuy")]
    PointBuy,
}

impl GenerationMode {
    /// Both modes, in the order they are offered.
    pub const ALL: [GenerationMode; 2] = [Self::Randomized, Self::PointBuy];

    /// Stable choice id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Randomized => "generate",
            Self::PointBuy => "pointbuy",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Randomized => "Roll characteristics",
            Self::PointBuy => "Point-buy",
        }
    }

    /// Parse a choice id.
    pub fn parse(id: &str) -> MechResult<Self> {
        match id.trim().to_lowercase().as_str() {
            "generate" | "roll" | "random" => Ok(Self::Randomized),
            "pointbuy" | "point-buy" => Ok(Self::PointBuy),
            _ => Err(MechError::UnknownMode(id.to_string())),
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Advantage and disadvantage granted by an origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bonuses {
    advantages: BTreeSet<Characteristic>,
    disadvantage: Option<Characteristic>,
}

impl Bonuses {
    /// Bonuses with explicit sets.
    pub fn new(
        advantages: impl IntoIterator<Item = Characteristic>,
        disadvantage: Option<Characteristic>,
    ) -> Self {
        Self {
            advantages: advantages.into_iter().collect(),
            disadvantage,
        }
    }

    /// Bonuses granted by an origin profile.
    pub fn from_origin(profile: &OriginProfile) -> Self {
        Self::new(profile.advantages(), profile.mod_minus)
    }

    /// Whether the characteristic has advantage.
    pub fn is_advantaged(&self, characteristic: Characteristic) -> bool {
        self.advantages.contains(&characteristic)
    }

    /// Whether the characteristic has disadvantage. Advantage wins over it.
    pub fn is_disadvantaged(&self, characteristic: Characteristic) -> bool {
        self.disadvantage == Some(characteristic) && !self.is_advantaged(characteristic)
    }

    /// The formula rolled for a characteristic in rolled generation.
    pub fn formula(&self, characteristic: Characteristic) -> &'static str {
        if self.is_advantaged(characteristic) {
            ADVANTAGE_FORMULA
        } else if self.is_disadvantaged(characteristic) {
            DISADVANTAGE_FORMULA
        } else {
            STANDARD_FORMULA
        }
    }

    /// The point-buy starting value for a characteristic.
    pub fn floor(&self, characteristic: Characteristic) -> i32 {
        if self.is_advantaged(characteristic) {
            ADVANTAGE_FLOOR
        } else {
            BASE_FLOOR
        }
    }
}

/// Clamp a generated value to the ceiling.
pub fn clamp_generated(value: i32) -> i32 {
    value.min(CEILING)
}
