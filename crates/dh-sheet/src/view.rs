//! Display model of a character sheet.

use dh_core::characteristic::bonus;
use dh_core::{AttachmentId, AttachmentKind, CharacterRecord, Characteristic, Profile, Track};
use serde::Serialize;

/// One characteristic row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacteristicRow {
    /// Which characteristic.
    pub characteristic: Characteristic,
    /// Short label.
    pub label: &'static str,
    /// Full name.
    pub full_name: &'static str,
    /// Stored value.
    pub value: i32,
    /// Tens digit of the value.
    pub bonus: i32,
}

/// A wound or fate counter as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackView {
    /// Current value clamped into `0..=maximum`.
    pub current: i32,
    /// Maximum value.
    pub maximum: i32,
    /// Fill percentage.
    pub percent: u8,
}

impl From<Track> for TrackView {
    fn from(track: Track) -> Self {
        Self {
            current: track.display_current(),
            maximum: track.maximum,
            percent: track.percent(),
        }
    }
}

/// One attachment in the properties list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRow {
    /// Attachment id.
    pub id: AttachmentId,
    /// Display name.
    pub name: String,
    /// Kind.
    pub kind: AttachmentKind,
    /// Whether its fields may be edited.
    pub editable: bool,
    /// Bound characteristic of a tendency.
    pub bound: Option<Characteristic>,
}

/// Everything the sheet shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetView {
    /// Character name.
    pub name: String,
    /// Displayed origin name.
    pub origin: String,
    /// Characteristics in sheet order.
    pub characteristics: Vec<CharacteristicRow>,
    /// Wounds.
    pub wounds: TrackView,
    /// Fate.
    pub fate: TrackView,
    /// Attachments in insertion order.
    pub attachments: Vec<AttachmentRow>,
}

impl SheetView {
    /// Build the view of a record.
    pub fn from_record(record: &CharacterRecord) -> Self {
        let characteristics = Characteristic::ALL
            .into_iter()
            .map(|c| {
                let value = record.characteristic(c);
                CharacteristicRow {
                    characteristic: c,
                    label: c.label(),
                    full_name: c.full_name(),
                    value,
                    bonus: bonus(value),
                }
            })
            .collect();
        let attachments = record
            .attachments()
            .iter()
            .map(|a| AttachmentRow {
                id: a.id,
                name: a.name.clone(),
                kind: a.kind(),
                editable: a.profile.editable(),
                bound: match &a.profile {
                    Profile::Tendency(t) => t.bind_characteristic,
                    Profile::Origin(_) => None,
                },
            })
            .collect();
        Self {
            name: record.name.clone(),
            origin: record.origin.clone(),
            characteristics,
            wounds: record.wounds.into(),
            fate: record.fate.into(),
            attachments,
        }
    }

    /// The row of one characteristic.
    pub fn row(&self, characteristic: Characteristic) -> Option<&CharacteristicRow> {
        self.characteristics
            .iter()
            .find(|r| r.characteristic == characteristic)
    }
}
