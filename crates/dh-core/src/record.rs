use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attachment::{Attachment, AttachmentId, AttachmentKind};
use crate::characteristic::{Characteristic, Characteristics};
use crate::error::{CoreError, CoreResult};
use crate::field::{FieldUpdate, paths};
use crate::track::Track;

/// Unique identifier of a character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A player character as the host stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Unique identifier.
    pub id: RecordId,
    /// Character name.
    pub name: String,
    /// Characteristic values.
    #[serde(default)]
    pub characteristics: Characteristics,
    /// Wound counters.
    #[serde(default)]
    pub wounds: Track,
    /// Fate counters.
    #[serde(default)]
    pub fate: Track,
    /// Name of the displayed origin. Empty when none is attached.
    #[serde(default)]
    pub origin: String,
    /// Attached profiles, in insertion order.
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl CharacterRecord {
    /// Create a fresh character with default characteristics and empty counters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            characteristics: Characteristics::new(),
            wounds: Track::default(),
            fate: Track::default(),
            origin: String::new(),
            attachments: Vec::new(),
        }
    }

    /// Current value of a characteristic.
    pub fn characteristic(&self, characteristic: Characteristic) -> i32 {
        self.characteristics.get(characteristic)
    }

    /// Apply a batched field-path update.
    ///
    /// Every path and value is checked before anything is written, so a
    /// rejected batch leaves the record untouched.
    pub fn apply(&mut self, update: &FieldUpdate) -> CoreResult<()> {
        let mut next = self.clone();
        for (path, value) in update.iter() {
            match path {
                paths::NAME => next.name = value.expect_str(path)?.to_string(),
                paths::ORIGIN => next.origin = value.expect_str(path)?.to_string(),
                paths::WOUNDS_CURRENT => next.wounds.current = value.expect_i32(path)?,
                paths::WOUNDS_MAXIMUM => next.wounds.maximum = value.expect_i32(path)?,
                paths::FATE_CURRENT => next.fate.current = value.expect_i32(path)?,
                paths::FATE_MAXIMUM => next.fate.maximum = value.expect_i32(path)?,
                other => {
                    let characteristic = other
                        .strip_prefix(paths::CHARACTERISTIC_PREFIX)
                        .and_then(Characteristic::from_key)
                        .ok_or_else(|| CoreError::UnknownField(other.to_string()))?;
                    next.characteristics
                        .set(characteristic, value.expect_i32(path)?);
                }
            }
        }
        *self = next;
        Ok(())
    }

    /// All attachments, in insertion order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Attachments of one kind, in insertion order.
    pub fn attachments_of(&self, kind: AttachmentKind) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(move |a| a.kind() == kind)
    }

    /// Look up an attachment by ID.
    pub fn attachment(&self, id: AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }

    /// Look up an attachment by ID for editing.
    pub fn attachment_mut(&mut self, id: AttachmentId) -> Option<&mut Attachment> {
        self.attachments.iter_mut().find(|a| a.id == id)
    }

    /// Find an attachment by name (case-insensitive).
    pub fn find_attachment(&self, name: &str) -> Option<&Attachment> {
        let lower = name.to_lowercase();
        self.attachments
            .iter()
            .find(|a| a.name.to_lowercase() == lower)
    }

    /// Attach a profile. Returns its ID.
    pub fn attach(&mut self, attachment: Attachment) -> AttachmentId {
        let id = attachment.id;
        self.attachments.push(attachment);
        id
    }

    /// Detach a profile, returning it.
    pub fn detach(&mut self, id: AttachmentId) -> CoreResult<Attachment> {
        let pos = self
            .attachments
            .iter()
            .position(|a| a.id == id)
            .ok_or(CoreError::AttachmentNotFound(id))?;
        Ok(self.attachments.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{OriginProfile, Profile, TendencyProfile};
    use crate::characteristic::DEFAULT_VALUE;
    use crate::field::FieldValue;

    fn origin(name: &str) -> Attachment {
        Attachment::new(name, Profile::Origin(OriginProfile::default()))
    }

    #[test]
    fn new_record_defaults() {
        let record = CharacterRecord::new("Ilsa");
        assert_eq!(record.characteristic(Characteristic::Agility), DEFAULT_VALUE);
        assert_eq!(record.wounds, Track::default());
        assert!(record.origin.is_empty());
        assert!(record.attachments().is_empty());
    }

    #[test]
    fn apply_batch() {
        let mut record = CharacterRecord::new("Ilsa");
        let update = FieldUpdate::new()
            .set(paths::WOUNDS_MAXIMUM, 12)
            .set(paths::FATE_MAXIMUM, 3)
            .set(paths::FATE_CURRENT, 3)
            .set(paths::ORIGIN, "Hive World")
            .set_characteristic(Characteristic::Toughness, 33);
        record.apply(&update).unwrap();
        assert_eq!(record.wounds.maximum, 12);
        assert_eq!(record.wounds.current, 0);
        assert_eq!(record.fate, Track::full(3));
        assert_eq!(record.origin, "Hive World");
        assert_eq!(record.characteristic(Characteristic::Toughness), 33);
    }

    #[test]
    fn apply_is_atomic() {
        let mut record = CharacterRecord::new("Ilsa");
        let update = FieldUpdate::new()
            .set(paths::WOUNDS_MAXIMUM, 12)
            .set("characteristics.luck", 50);
        assert!(matches!(
            record.apply(&update),
            Err(CoreError::UnknownField(_))
        ));
        assert_eq!(record.wounds.maximum, 0);

        let update = FieldUpdate::new()
            .set(paths::WOUNDS_MAXIMUM, 12)
            .set(paths::FATE_MAXIMUM, FieldValue::from("three"));
        assert!(matches!(
            record.apply(&update),
            Err(CoreError::FieldType { .. })
        ));
        assert_eq!(record.wounds.maximum, 0);
    }

    #[test]
    fn attachments_keep_insertion_order() {
        let mut record = CharacterRecord::new("Ilsa");
        let a = record.attach(origin("Hive World"));
        record.attach(Attachment::new(
            "Zealous",
            Profile::Tendency(TendencyProfile::default()),
        ));
        let c = record.attach(origin("Feral World"));

        let origins: Vec<_> = record
            .attachments_of(AttachmentKind::Origin)
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(origins, vec!["Hive World", "Feral World"]);

        record.detach(a).unwrap();
        assert_eq!(record.attachments().len(), 2);
        assert!(record.attachment(c).is_some());
        assert!(record.find_attachment("zealous").is_some());
    }

    #[test]
    fn detach_missing() {
        let mut record = CharacterRecord::new("Ilsa");
        assert!(matches!(
            record.detach(AttachmentId::new()),
            Err(CoreError::AttachmentNotFound(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_attachments() {
        let mut record = CharacterRecord::new("Ilsa");
        record.attach(origin("Hive World"));
        let json = serde_json::to_string(&record).unwrap();
        let back: CharacterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.attachments().len(), 1);
        assert_eq!(back.id, record.id);
    }
}
