use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::characteristic::{self, Characteristic};
use crate::error::{CoreError, CoreResult};
use crate::field::{FieldUpdate, FieldValue};

/// Unique identifier of an attachment on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(pub Uuid);

impl AttachmentId {
    /// Generate a new random attachment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its full textual form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of an attached record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// A homeworld: drives wounds, fate, and characteristic generation.
    #[default]
    Origin,
    /// A tendency bound to one characteristic.
    Tendency,
}

impl AttachmentKind {
    /// Parse a kind from its name. `homeworld` is accepted for origins.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "origin" | "homeworld" => Some(Self::Origin),
            "tendency" => Some(Self::Tendency),
            _ => None,
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Tendency => write!(f, "tendency"),
        }
    }
}

/// Data of an origin ("homeworld") profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OriginProfile {
    /// Dice formula for maximum wounds. Empty means "do not roll".
    #[serde(deserialize_with = "lenient_formula")]
    pub wounds_formula: String,
    /// Base fate points.
    #[serde(deserialize_with = "lenient_count")]
    pub fate_base: i32,
    /// d10 result needed for the +1 fate blessing. Only 1..=10 is rolled.
    #[serde(deserialize_with = "lenient_threshold")]
    pub blessing_threshold: Option<i32>,
    /// First characteristic granted advantage.
    #[serde(deserialize_with = "characteristic::deserialize_optional")]
    pub mod_plus1: Option<Characteristic>,
    /// Second characteristic granted advantage.
    #[serde(deserialize_with = "characteristic::deserialize_optional")]
    pub mod_plus2: Option<Characteristic>,
    /// Characteristic given disadvantage.
    #[serde(deserialize_with = "characteristic::deserialize_optional")]
    pub mod_minus: Option<Characteristic>,
    /// Whether the profile's fields may be changed.
    pub editable: bool,
    /// Free-form description.
    pub description: String,
}

impl OriginProfile {
    /// Characteristics granted advantage, deduplicated, in slot order.
    pub fn advantages(&self) -> Vec<Characteristic> {
        let mut out = Vec::with_capacity(2);
        for c in [self.mod_plus1, self.mod_plus2].into_iter().flatten() {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// The blessing threshold when it is one a d10 can meet.
    pub fn blessing(&self) -> Option<i32> {
        self.blessing_threshold.filter(|t| (1..=10).contains(t))
    }
}

/// A formula field: text as given, numbers as their digits, anything else empty.
fn lenient_formula<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A number typed into a profile field, possibly as a string.
fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(loose_number(&value).map_or(0, |n| {
        n.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }))
}

/// Blank, null and non-numeric thresholds are unset. A d10 meets `6.5`
/// exactly when it meets 7.
fn lenient_threshold<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(loose_number(&value)
        .map(|n| n.ceil().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32))
}

/// Data of a tendency profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TendencyProfile {
    /// Characteristic this tendency is bound to.
    #[serde(deserialize_with = "characteristic::deserialize_optional")]
    pub bind_characteristic: Option<Characteristic>,
    /// Whether the profile's fields may be changed.
    pub editable: bool,
    /// Free-form description.
    pub description: String,
}

/// Kind-specific attachment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "snake_case")]
pub enum Profile {
    /// Origin profile data.
    Origin(OriginProfile),
    /// Tendency profile data.
    Tendency(TendencyProfile),
}

impl Profile {
    /// The kind of this profile.
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Self::Origin(_) => AttachmentKind::Origin,
            Self::Tendency(_) => AttachmentKind::Tendency,
        }
    }

    /// Whether the profile's fields may be changed.
    pub fn editable(&self) -> bool {
        match self {
            Self::Origin(p) => p.editable,
            Self::Tendency(p) => p.editable,
        }
    }

    fn set_editable(&mut self, editable: bool) {
        match self {
            Self::Origin(p) => p.editable = editable,
            Self::Tendency(p) => p.editable = editable,
        }
    }
}

/// A record attached to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier.
    pub id: AttachmentId,
    /// Display name.
    pub name: String,
    /// Kind-specific data.
    pub profile: Profile,
}

impl Attachment {
    /// Create an attachment with a fresh ID.
    pub fn new(name: impl Into<String>, profile: Profile) -> Self {
        Self {
            id: AttachmentId::new(),
            name: name.into(),
            profile,
        }
    }

    /// The kind of this attachment.
    pub fn kind(&self) -> AttachmentKind {
        self.profile.kind()
    }

    /// Origin data, if this is an origin profile.
    pub fn as_origin(&self) -> Option<&OriginProfile> {
        match &self.profile {
            Profile::Origin(p) => Some(p),
            Profile::Tendency(_) => None,
        }
    }

    /// Apply a batched edit to the profile.
    ///
    /// `editable` may always be toggled. Any other field is rejected while
    /// the profile is locked, judged by the lock state before this batch.
    /// The batch is validated completely before anything is written.
    pub fn update(&mut self, update: &FieldUpdate) -> CoreResult<()> {
        let mut next = self.clone();
        let unlocked = self.profile.editable();
        for (path, value) in update.iter() {
            if path == "editable" {
                next.profile.set_editable(value.expect_bool(path)?);
                continue;
            }
            if !unlocked {
                return Err(CoreError::Locked(self.name.clone()));
            }
            match (&mut next.profile, path) {
                (_, "name") => next.name = value.expect_str(path)?.to_string(),
                (Profile::Origin(p), "description") => {
                    p.description = value.expect_str(path)?.to_string()
                }
                (Profile::Tendency(p), "description") => {
                    p.description = value.expect_str(path)?.to_string()
                }
                (Profile::Origin(p), "woundsFormula") => {
                    p.wounds_formula = value.expect_str(path)?.trim().to_string()
                }
                (Profile::Origin(p), "fateBase") => p.fate_base = value.expect_i32(path)?,
                (Profile::Origin(p), "blessingThreshold") => {
                    p.blessing_threshold = Some(value.expect_i32(path)?)
                }
                (Profile::Origin(p), "modPlus1") => p.mod_plus1 = characteristic_field(value, path)?,
                (Profile::Origin(p), "modPlus2") => p.mod_plus2 = characteristic_field(value, path)?,
                (Profile::Origin(p), "modMinus") => p.mod_minus = characteristic_field(value, path)?,
                (Profile::Tendency(p), "bindCharacteristic") => {
                    p.bind_characteristic = characteristic_field(value, path)?
                }
                _ => return Err(CoreError::UnknownField(path.to_string())),
            }
        }
        *self = next;
        Ok(())
    }
}

fn characteristic_field(
    value: &FieldValue,
    path: &str,
) -> CoreResult<Option<Characteristic>> {
    let key = value.expect_str(path)?;
    if key.trim().is_empty() {
        return Ok(None);
    }
    Characteristic::from_key(key)
        .map(Some)
        .ok_or_else(|| CoreError::InvalidProfile(format!("{path}: unknown characteristic {key:?}")))
}

/// A document that can be turned into an attachment (a drop payload or a file).
///
/// The `system` object is interpreted according to `type`; a missing type
/// means an origin profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachmentSource {
    /// Display name.
    pub name: String,
    /// Declared kind, if any.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Kind-specific data.
    #[serde(default)]
    pub system: serde_json::Value,
}

impl AttachmentSource {
    /// The kind this source resolves to.
    pub fn resolved_kind(&self) -> CoreResult<AttachmentKind> {
        match self.kind.as_deref() {
            None | Some("") => Ok(AttachmentKind::default()),
            Some(kind) => AttachmentKind::parse(kind)
                .ok_or_else(|| CoreError::InvalidProfile(format!("unknown type {kind:?}"))),
        }
    }

    /// Build an attachment with a fresh ID.
    pub fn into_attachment(self) -> CoreResult<Attachment> {
        let kind = self.resolved_kind()?;
        let system = if self.system.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            self.system
        };
        let profile = match kind {
            AttachmentKind::Origin => Profile::Origin(
                serde_json::from_value(system).map_err(|e| CoreError::InvalidProfile(e.to_string()))?,
            ),
            AttachmentKind::Tendency => Profile::Tendency(
                serde_json::from_value(system).map_err(|e| CoreError::InvalidProfile(e.to_string()))?,
            ),
        };
        Ok(Attachment::new(self.name, profile))
    }
}
