//! In-memory record and attachment store.

use std::collections::HashMap;

use async_trait::async_trait;
use dh_core::{Attachment, AttachmentId, CharacterRecord, CoreError, FieldUpdate, RecordId};
use tokio::sync::RwLock;

use crate::error::{PortError, PortResult};
use crate::ports::{AttachmentStore, RecordStore};

/// Character records held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<RecordId, CharacterRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a record.
    pub async fn insert(&self, record: CharacterRecord) -> RecordId {
        let id = record.id;
        self.records.write().await.insert(id, record);
        id
    }

    /// A copy of a stored record.
    pub async fn snapshot(&self, id: RecordId) -> Option<CharacterRecord> {
        self.records.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, id: RecordId) -> PortResult<CharacterRecord> {
        self.snapshot(id)
            .await
            .ok_or_else(|| PortError::not_found("record", id))
    }

    async fn update(&self, id: RecordId, update: FieldUpdate) -> PortResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("record", id))?;
        record.apply(&update)?;
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for MemoryStore {
    async fn create(&self, record: RecordId, attachment: Attachment) -> PortResult<AttachmentId> {
        let mut records = self.records.write().await;
        let target = records
            .get_mut(&record)
            .ok_or_else(|| PortError::not_found("record", record))?;
        Ok(target.attach(attachment))
    }

    async fn remove(&self, record: RecordId, attachment: AttachmentId) -> PortResult<()> {
        let mut records = self.records.write().await;
        let target = records
            .get_mut(&record)
            .ok_or_else(|| PortError::not_found("record", record))?;
        match target.detach(attachment) {
            Ok(_) => Ok(()),
            Err(CoreError::AttachmentNotFound(id)) => Err(PortError::not_found("attachment", id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, record: RecordId) -> PortResult<Vec<Attachment>> {
        let records = self.records.read().await;
        let target = records
            .get(&record)
            .ok_or_else(|| PortError::not_found("record", record))?;
        Ok(target.attachments().to_vec())
    }

    async fn update(
        &self,
        record: RecordId,
        attachment: AttachmentId,
        update: FieldUpdate,
    ) -> PortResult<()> {
        let mut records = self.records.write().await;
        let target = records
            .get_mut(&record)
            .ok_or_else(|| PortError::not_found("record", record))?
            .attachment_mut(attachment)
            .ok_or_else(|| PortError::not_found("attachment", attachment))?;
        target.update(&update)?;
        Ok(())
    }
}
