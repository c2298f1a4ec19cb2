//! Dropping items onto the sheet.
//!
//! A drop payload names an item by uuid, by pack and id, or carries the
//! item inline. The first that resolves wins. Anything unresolvable is
//! ignored without an error.

use dh_core::field::paths;
use dh_core::{Attachment, AttachmentId, AttachmentKind, AttachmentSource, FieldUpdate, RecordId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::origin::OriginReport;
use crate::error::SheetResult;
use crate::sheet::Sheet;

const ITEM_TYPE: &str = "Item";

/// Data carried by a drag-and-drop onto the sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropPayload {
    /// Document type of the dragged thing.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Universal id of the item.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Compendium pack holding the item.
    #[serde(default)]
    pub pack: Option<String>,
    /// Id of the item inside the pack.
    #[serde(default)]
    pub id: Option<String>,
    /// The item itself.
    #[serde(default)]
    pub data: Option<AttachmentSource>,
}

impl DropPayload {
    /// A payload carrying an item inline.
    pub fn inline(source: AttachmentSource) -> Self {
        Self {
            kind: Some(ITEM_TYPE.to_string()),
            data: Some(source),
            ..Self::default()
        }
    }

    /// Whether the payload is an item at all.
    pub fn is_item(&self) -> bool {
        self.kind.as_deref() == Some(ITEM_TYPE)
            || self.uuid.as_deref().is_some_and(|u| u.contains("Item."))
    }
}

/// What attaching an item did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReport {
    /// The new attachment.
    pub attachment: AttachmentId,
    /// Its kind.
    pub kind: AttachmentKind,
    /// The origin application, when an origin was attached.
    pub origin: Option<OriginReport>,
}

impl Sheet {
    /// Resolve a drop payload to an item.
    pub async fn resolve_drop(&self, payload: &DropPayload) -> Option<AttachmentSource> {
        if let Some(uuid) = payload.uuid.as_deref() {
            if let Some(source) = self.ports.catalog.by_uuid(uuid).await {
                return Some(source);
            }
        }
        if let (Some(pack), Some(id)) = (payload.pack.as_deref(), payload.id.as_deref()) {
            if let Some(source) = self.ports.catalog.by_pack(pack, id).await {
                return Some(source);
            }
        }
        if payload.kind.as_deref() == Some(ITEM_TYPE) {
            return payload.data.clone();
        }
        None
    }

    /// Handle a drop. Returns `None` when nothing was attached.
    pub async fn handle_drop(
        &self,
        record: RecordId,
        payload: &DropPayload,
    ) -> SheetResult<Option<AttachReport>> {
        if !payload.is_item() {
            debug!(%record, "ignoring drop that is not an item");
            return Ok(None);
        }
        let Some(source) = self.resolve_drop(payload).await else {
            debug!(%record, "drop did not resolve to an item");
            return Ok(None);
        };
        let attachment = match source.into_attachment() {
            Ok(attachment) => attachment,
            Err(e) => {
                warn!(%record, error = %e, "dropped item is not a usable profile");
                return Ok(None);
            }
        };
        self.attach(record, attachment).await.map(Some)
    }

    /// Attach a profile. An origin also becomes the displayed origin and
    /// runs origin application.
    pub async fn attach(&self, record: RecordId, attachment: Attachment) -> SheetResult<AttachReport> {
        let kind = attachment.kind();
        if kind != AttachmentKind::Origin {
            let id = self.ports.attachments.create(record, attachment).await?;
            return Ok(AttachReport {
                attachment: id,
                kind,
                origin: None,
            });
        }

        let _guard = self.locks.acquire(record)?;
        let name = attachment.name.clone();
        let id = self.ports.attachments.create(record, attachment).await?;
        self.ports
            .records
            .update(record, FieldUpdate::new().set(paths::ORIGIN, name))
            .await?;
        let report = self.run_origin(record, id).await?;
        Ok(AttachReport {
            attachment: id,
            kind,
            origin: Some(report),
        })
    }
}
