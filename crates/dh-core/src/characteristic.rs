use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Value a characteristic has before anything has set it.
pub const DEFAULT_VALUE: i32 = 25;

/// One of the ten characteristics every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    /// Weapon Skill.
    #[serde(rename = "ws")]
    WeaponSkill,
    /// Ballistic Skill.
    #[serde(rename = "bs")]
    BallisticSkill,
    /// Strength.
    #[serde(rename = "s")]
    Strength,
    /// Toughness.
    #[serde(rename = "t")]
    Toughness,
    /// Agility.
    #[serde(rename = "ag")]
    Agility,
    /// Intelligence.
    #[serde(rename = "int")]
    Intelligence,
    /// Perception.
    #[serde(rename = "per")]
    Perception,
    /// Willpower.
    #[serde(rename = "wp")]
    Willpower,
    /// Fellowship.
    #[serde(rename = "fel")]
    Fellowship,
    /// Influence.
    #[serde(rename = "inf")]
    Influence,
}

/// Display data for a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicInfo {
    /// Which characteristic this row describes.
    pub characteristic: Characteristic,
    /// Stable identifier used in field paths and profiles.
    pub key: &'static str,
    /// Short sheet label.
    pub label: &'static str,
    /// Full display name.
    pub full_name: &'static str,
}

const fn info(
    characteristic: Characteristic,
    key: &'static str,
    label: &'static str,
    full_name: &'static str,
) -> CharacteristicInfo {
    CharacteristicInfo {
        characteristic,
        key,
        label,
        full_name,
    }
}

/// The one label table every component reads from, in sheet order.
pub const TABLE: [CharacteristicInfo; 10] = [
    info(Characteristic::WeaponSkill, "ws", "WS", "Weapon Skill"),
    info(Characteristic::BallisticSkill, "bs", "BS", "Ballistic Skill"),
    info(Characteristic::Strength, "s", "S", "Strength"),
    info(Characteristic::Toughness, "t", "T", "Toughness"),
    info(Characteristic::Agility, "ag", "Ag", "Agility"),
    info(Characteristic::Intelligence, "int", "Int", "Intelligence"),
    info(Characteristic::Perception, "per", "Per", "Perception"),
    info(Characteristic::Willpower, "wp", "WP", "Willpower"),
    info(Characteristic::Fellowship, "fel", "Fel", "Fellowship"),
    info(Characteristic::Influence, "inf", "Inf", "Influence"),
];

impl Characteristic {
    /// All characteristics in sheet order.
    pub const ALL: [Characteristic; 10] = [
        Self::WeaponSkill,
        Self::BallisticSkill,
        Self::Strength,
        Self::Toughness,
        Self::Agility,
        Self::Intelligence,
        Self::Perception,
        Self::Willpower,
        Self::Fellowship,
        Self::Influence,
    ];

    /// Row for this characteristic in [`TABLE`].
    pub fn info(self) -> &'static CharacteristicInfo {
        &TABLE[self as usize]
    }

    /// Stable key (`ws`, `bs`, ...).
    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// Short sheet label (`WS`, `BS`, ...).
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Full display name.
    pub fn full_name(self) -> &'static str {
        self.info().full_name
    }

    /// Parse a characteristic from its key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        TABLE
            .iter()
            .find(|row| row.key == key)
            .map(|row| row.characteristic)
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Tens digit of a characteristic value, used as a flat bonus.
pub fn bonus(value: i32) -> i32 {
    value.div_euclid(10)
}

/// Deserialize an optional characteristic where an empty or unknown key means unset.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<Characteristic>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Characteristic::from_key))
}

/// Characteristic values of a character.
///
/// Missing entries read as [`DEFAULT_VALUE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Characteristics {
    values: BTreeMap<Characteristic, i32>,
}

impl Characteristics {
    /// All ten characteristics at the default value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a characteristic.
    pub fn get(&self, characteristic: Characteristic) -> i32 {
        self.values
            .get(&characteristic)
            .copied()
            .unwrap_or(DEFAULT_VALUE)
    }

    /// Set the value of a characteristic.
    pub fn set(&mut self, characteristic: Characteristic, value: i32) {
        self.values.insert(characteristic, value);
    }

    /// Iterate over all ten characteristics with their values, in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Characteristic, i32)> + '_ {
        Characteristic::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}
