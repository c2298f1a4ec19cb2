//! Reaction to an attachment being removed.

use dh_core::field::paths;
use dh_core::{Attachment, AttachmentId, AttachmentKind, FieldUpdate, RecordId};
use tracing::{debug, info};

use crate::error::SheetResult;
use crate::sheet::Sheet;

/// What removing an attachment did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// No attachment had that id. Nothing changed.
    Missing,
    /// A non-origin attachment was removed.
    Detached(Attachment),
    /// An origin was removed and the displayed origin recomputed.
    OriginDetached {
        /// The removed origin.
        attachment: Attachment,
        /// The origin now displayed, or `None` when wounds and fate were reset.
        next_origin: Option<String>,
    },
}

impl Sheet {
    /// Remove an attachment and update the record to match.
    ///
    /// Removing an origin shows the first remaining origin's name. When no
    /// origin remains, wounds and fate are reset to zero. Characteristic
    /// values are never touched.
    pub async fn remove_attachment(
        &self,
        record: RecordId,
        attachment: AttachmentId,
    ) -> SheetResult<Removal> {
        let attachments = self.ports.attachments.list(record).await?;
        let Some(removed) = attachments.into_iter().find(|a| a.id == attachment) else {
            debug!(%record, %attachment, "nothing to remove");
            return Ok(Removal::Missing);
        };
        self.ports.attachments.remove(record, attachment).await?;
        if removed.kind() != AttachmentKind::Origin {
            return Ok(Removal::Detached(removed));
        }

        let next_origin = self
            .ports
            .attachments
            .list(record)
            .await?
            .into_iter()
            .find(|a| a.kind() == AttachmentKind::Origin)
            .map(|a| a.name);
        let mut update =
            FieldUpdate::new().set(paths::ORIGIN, next_origin.clone().unwrap_or_default());
        if next_origin.is_none() {
            info!(%record, origin = %removed.name, "last origin removed, resetting wounds and fate");
            update.insert(paths::WOUNDS_MAXIMUM, 0);
            update.insert(paths::WOUNDS_CURRENT, 0);
            update.insert(paths::FATE_MAXIMUM, 0);
            update.insert(paths::FATE_CURRENT, 0);
        }
        self.ports.records.update(record, update).await?;
        Ok(Removal::OriginDetached {
            attachment: removed,
            next_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dh_core::{Characteristic, OriginProfile, Profile, TendencyProfile};

    use super::*;
    use crate::adapters::{MemoryCatalog, ScriptedDialog};
    use crate::config::SheetConfig;
    use crate::ports::{AttachmentStore, RecordStore};
    use crate::workflow::harness::{Harness, fixed_dice, harness};

    fn origin(name: &str) -> Attachment {
        Attachment::new(name, Profile::Origin(OriginProfile::default()))
    }

    async fn rolled() -> Harness {
        let h = harness(
            fixed_dice(&[]),
            Arc::new(ScriptedDialog::default()),
            SheetConfig::default(),
            MemoryCatalog::new(),
        )
        .await;
        let update = FieldUpdate::new()
            .set(paths::ORIGIN, "Hive World")
            .set(paths::WOUNDS_MAXIMUM, 12)
            .set(paths::WOUNDS_CURRENT, 9)
            .set(paths::FATE_MAXIMUM, 3)
            .set(paths::FATE_CURRENT, 2)
            .set_characteristic(Characteristic::Strength, 38);
        RecordStore::update(h.store.as_ref(), h.record, update)
            .await
            .unwrap();
        h
    }

    #[tokio::test]
    async fn removing_last_origin_resets_tracks() {
        let h = rolled().await;
        let id = h.store.create(h.record, origin("Hive World")).await.unwrap();
        let removal = h.sheet.remove_attachment(h.record, id).await.unwrap();
        assert!(matches!(removal, Removal::OriginDetached { next_origin: None, .. }));

        let character = h.snapshot().await;
        assert_eq!(character.origin, "");
        assert_eq!(character.wounds.maximum, 0);
        assert_eq!(character.wounds.current, 0);
        assert_eq!(character.fate.maximum, 0);
        assert_eq!(character.fate.current, 0);
        assert_eq!(character.characteristic(Characteristic::Strength), 38);
    }

    #[tokio::test]
    async fn remaining_origin_takes_over_name() {
        let h = rolled().await;
        let first = h.store.create(h.record, origin("Hive World")).await.unwrap();
        h.store.create(h.record, origin("Forge World")).await.unwrap();
        let removal = h.sheet.remove_attachment(h.record, first).await.unwrap();
        assert!(matches!(
            removal,
            Removal::OriginDetached { next_origin: Some(ref n), .. } if n == "Forge World"
        ));

        let character = h.snapshot().await;
        assert_eq!(character.origin, "Forge World");
        assert_eq!(character.wounds.maximum, 12);
        assert_eq!(character.fate.current, 2);
    }

    #[tokio::test]
    async fn removing_tendency_leaves_record_alone() {
        let h = rolled().await;
        let id = h
            .store
            .create(
                h.record,
                Attachment::new("Zealous", Profile::Tendency(TendencyProfile::default())),
            )
            .await
            .unwrap();
        let removal = h.sheet.remove_attachment(h.record, id).await.unwrap();
        assert!(matches!(removal, Removal::Detached(_)));
        let character = h.snapshot().await;
        assert_eq!(character.origin, "Hive World");
        assert_eq!(character.wounds.maximum, 12);
    }

    #[tokio::test]
    async fn missing_attachment_is_a_no_op() {
        let h = rolled().await;
        let removal = h
            .sheet
            .remove_attachment(h.record, AttachmentId::new())
            .await
            .unwrap();
        assert_eq!(removal, Removal::Missing);
        assert_eq!(h.snapshot().await.fate.maximum, 3);
    }
}
