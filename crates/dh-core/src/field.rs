use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::characteristic::Characteristic;
use crate::error::CoreError;

/// Well-known field paths on a character record.
pub mod paths {
    use crate::characteristic::Characteristic;

    /// Character name.
    pub const NAME: &str = "name";
    /// Current wounds.
    pub const WOUNDS_CURRENT: &str = "wounds.current";
    /// Maximum wounds.
    pub const WOUNDS_MAXIMUM: &str = "wounds.maximum";
    /// Current fate points.
    pub const FATE_CURRENT: &str = "fate.current";
    /// Maximum fate points.
    pub const FATE_MAXIMUM: &str = "fate.maximum";
    /// Displayed origin name.
    pub const ORIGIN: &str = "profile.origin";
    /// Prefix shared by characteristic paths.
    pub const CHARACTERISTIC_PREFIX: &str = "characteristics.";

    /// Path of a characteristic value.
    pub fn characteristic(characteristic: Characteristic) -> String {
        format!("{CHARACTERISTIC_PREFIX}{}", characteristic.key())
    }
}

/// A value written to a field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A text value.
    String(String),
}

impl FieldValue {
    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    /// Integer view. Finite floats are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Text view.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view narrowed to `i32`, or a type error for `path`.
    pub fn expect_i32(&self, path: &str) -> Result<i32, CoreError> {
        self.as_int()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| self.type_error(path, "integer"))
    }

    /// Text view, or a type error for `path`.
    pub fn expect_str(&self, path: &str) -> Result<&str, CoreError> {
        self.as_str().ok_or_else(|| self.type_error(path, "string"))
    }

    /// Boolean view, or a type error for `path`.
    pub fn expect_bool(&self, path: &str) -> Result<bool, CoreError> {
        self.as_bool().ok_or_else(|| self.type_error(path, "boolean"))
    }

    fn type_error(&self, path: &str, expected: &'static str) -> CoreError {
        CoreError::FieldType {
            path: path.to_string(),
            expected,
            found: format!("{} {self}", self.type_name()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A batch of field-path writes, applied all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldUpdate {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a write to the batch. A later write to the same path wins.
    pub fn set(mut self, path: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(path.into(), value.into());
        self
    }

    /// Add a characteristic write to the batch.
    pub fn set_characteristic(self, characteristic: Characteristic, value: i32) -> Self {
        self.set(paths::characteristic(characteristic), value)
    }

    /// Add a write in place.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(path.into(), value.into());
    }

    /// Value written to `path`, if any.
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        self.fields.get(path)
    }

    /// Iterate over the writes in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of writes in the batch.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
