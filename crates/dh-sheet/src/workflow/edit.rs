//! Manual edits from the sheet.
//!
//! Typed-in numbers are coerced rather than rejected: garbage becomes 0.

use std::collections::BTreeMap;

use dh_core::field::paths;
use dh_core::{AttachmentId, Characteristic, FieldUpdate, RecordId};

use crate::error::SheetResult;
use crate::ports::DialogOutcome;
use crate::sheet::Sheet;

/// Highest value the characteristic form accepts.
pub const CHARACTERISTIC_MAX: i32 = 100;

/// An editable wound or fate counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    /// Current wounds.
    WoundsCurrent,
    /// Maximum wounds.
    WoundsMaximum,
    /// Current fate.
    FateCurrent,
    /// Maximum fate.
    FateMaximum,
}

impl TrackField {
    /// The record path this counter lives at.
    pub fn path(self) -> &'static str {
        match self {
            Self::WoundsCurrent => paths::WOUNDS_CURRENT,
            Self::WoundsMaximum => paths::WOUNDS_MAXIMUM,
            Self::FateCurrent => paths::FATE_CURRENT,
            Self::FateMaximum => paths::FATE_MAXIMUM,
        }
    }

    /// Parse a record path.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            paths::WOUNDS_CURRENT => Some(Self::WoundsCurrent),
            paths::WOUNDS_MAXIMUM => Some(Self::WoundsMaximum),
            paths::FATE_CURRENT => Some(Self::FateCurrent),
            paths::FATE_MAXIMUM => Some(Self::FateMaximum),
            _ => None,
        }
    }
}

/// Read a counter the way a number typed into the sheet is read.
///
/// Leading digits count (`"12abc"` is 12). Anything else, and any
/// negative number, is 0.
pub fn coerce_count(raw: &str) -> i32 {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end]
        .parse::<i64>()
        .ok()
        .and_then(|n| i32::try_from(n.clamp(0, i64::from(i32::MAX))).ok())
        .unwrap_or(0)
}

/// Read a characteristic form field. Non-numbers are 0; the result is
/// truncated and clamped to `0..=100`.
pub fn coerce_characteristic(raw: &str) -> i32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n.clamp(0.0, f64::from(CHARACTERISTIC_MAX)).trunc() as i32,
        _ => 0,
    }
}

impl Sheet {
    /// Store a typed-in wound or fate value. Returns the value stored.
    pub async fn edit_track(&self, record: RecordId, field: TrackField, raw: &str) -> SheetResult<i32> {
        let value = coerce_count(raw);
        self.ports
            .records
            .update(record, FieldUpdate::new().set(field.path(), value))
            .await?;
        Ok(value)
    }

    /// Open the characteristic form and store what comes back.
    ///
    /// Returns `None` when the form is closed without saving.
    pub async fn edit_characteristics(
        &self,
        record: RecordId,
    ) -> SheetResult<Option<BTreeMap<Characteristic, i32>>> {
        let current = self.ports.records.get(record).await?.characteristics;
        let form = match self
            .ask(self.ports.dialog.characteristic_form(current))
            .await
        {
            DialogOutcome::Chosen(form) => form,
            DialogOutcome::Dismissed | DialogOutcome::TimedOut => return Ok(None),
        };
        let values: BTreeMap<Characteristic, i32> = form
            .iter()
            .map(|(&c, raw)| (c, coerce_characteristic(raw)))
            .collect();
        if !values.is_empty() {
            let update = values
                .iter()
                .fold(FieldUpdate::new(), |u, (&c, &v)| u.set_characteristic(c, v));
            self.ports.records.update(record, update).await?;
        }
        Ok(Some(values))
    }

    /// Edit an attachment's profile. Locked profiles only accept `editable`.
    pub async fn edit_attachment(
        &self,
        record: RecordId,
        attachment: AttachmentId,
        update: FieldUpdate,
    ) -> SheetResult<()> {
        self.ports
            .attachments
            .update(record, attachment, update)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dh_core::{Attachment, OriginProfile, Profile};

    use super::*;
    use crate::adapters::{MemoryCatalog, ScriptedAnswer, ScriptedDialog};
    use crate::config::SheetConfig;
    use crate::error::{PortError, SheetError};
    use crate::ports::AttachmentStore;
    use crate::workflow::harness::{Harness, fixed_dice, harness};

    async fn setup(answers: Vec<ScriptedAnswer>) -> Harness {
        harness(
            fixed_dice(&[]),
            Arc::new(ScriptedDialog::new(answers)),
            SheetConfig::default(),
            MemoryCatalog::new(),
        )
        .await
    }

    #[test]
    fn count_coercion() {
        assert_eq!(coerce_count("12"), 12);
        assert_eq!(coerce_count(" 7 "), 7);
        assert_eq!(coerce_count("12abc"), 12);
        assert_eq!(coerce_count("3.9"), 3);
        assert_eq!(coerce_count("-4"), 0);
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("+"), 0);
    }

    #[test]
    fn characteristic_coercion() {
        assert_eq!(coerce_characteristic("42"), 42);
        assert_eq!(coerce_characteristic("42.8"), 42);
        assert_eq!(coerce_characteristic("150"), 100);
        assert_eq!(coerce_characteristic("-3"), 0);
        assert_eq!(coerce_characteristic("forty"), 0);
        assert_eq!(coerce_characteristic("NaN"), 0);
        assert_eq!(coerce_characteristic(""), 0);
    }

    #[test]
    fn track_paths() {
        for field in [
            TrackField::WoundsCurrent,
            TrackField::WoundsMaximum,
            TrackField::FateCurrent,
            TrackField::FateMaximum,
        ] {
            assert_eq!(TrackField::from_path(field.path()), Some(field));
        }
        assert_eq!(TrackField::from_path("name"), None);
    }

    #[tokio::test]
    async fn track_edit_coerces() {
        let h = setup(vec![]).await;
        let stored = h
            .sheet
            .edit_track(h.record, TrackField::WoundsCurrent, "oops")
            .await
            .unwrap();
        assert_eq!(stored, 0);
        h.sheet
            .edit_track(h.record, TrackField::FateMaximum, "3")
            .await
            .unwrap();
        let character = h.snapshot().await;
        assert_eq!(character.wounds.current, 0);
        assert_eq!(character.fate.maximum, 3);
    }

    #[tokio::test]
    async fn characteristic_form_saves_coerced_values() {
        let form = BTreeMap::from([
            (Characteristic::Strength, "44".to_string()),
            (Characteristic::Intelligence, "lots".to_string()),
            (Characteristic::Willpower, "250".to_string()),
        ]);
        let h = setup(vec![ScriptedAnswer::Fill(form)]).await;
        let values = h.sheet.edit_characteristics(h.record).await.unwrap().unwrap();
        assert_eq!(values[&Characteristic::Intelligence], 0);

        let character = h.snapshot().await;
        assert_eq!(character.characteristic(Characteristic::Strength), 44);
        assert_eq!(character.characteristic(Characteristic::Intelligence), 0);
        assert_eq!(character.characteristic(Characteristic::Willpower), 100);
        assert_eq!(character.characteristic(Characteristic::Agility), 25);
    }

    #[tokio::test]
    async fn cancelled_form_changes_nothing() {
        let h = setup(vec![ScriptedAnswer::Dismiss]).await;
        assert!(h.sheet.edit_characteristics(h.record).await.unwrap().is_none());
        assert_eq!(h.snapshot().await.characteristic(Characteristic::Strength), 25);
    }

    #[tokio::test]
    async fn locked_profile_rejects_edits() {
        let h = setup(vec![]).await;
        let id = h
            .store
            .create(
                h.record,
                Attachment::new("Hive World", Profile::Origin(OriginProfile::default())),
            )
            .await
            .unwrap();

        let err = h
            .sheet
            .edit_attachment(h.record, id, FieldUpdate::new().set("fateBase", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, SheetError::Port(PortError::Rejected(_))));

        let unlock = FieldUpdate::new().set("editable", true).set("fateBase", 3);
        assert!(h.sheet.edit_attachment(h.record, id, unlock.clone()).await.is_err());

        h.sheet
            .edit_attachment(h.record, id, FieldUpdate::new().set("editable", true))
            .await
            .unwrap();
        h.sheet.edit_attachment(h.record, id, unlock).await.unwrap();
        let character = h.snapshot().await;
        let profile = character.attachment(id).unwrap().as_origin().unwrap();
        assert_eq!(profile.fate_base, 3);
        assert!(profile.editable);
    }
}
