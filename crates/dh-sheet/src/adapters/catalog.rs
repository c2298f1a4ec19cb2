//! Item catalog over in-memory maps.

use std::collections::HashMap;

use async_trait::async_trait;
use dh_core::AttachmentSource;

use crate::ports::ItemCatalog;

/// Items addressable by uuid or by pack and id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    by_uuid: HashMap<String, AttachmentSource>,
    by_pack: HashMap<(String, String), AttachmentSource>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item under a uuid.
    pub fn with_item(mut self, uuid: impl Into<String>, source: AttachmentSource) -> Self {
        self.by_uuid.insert(uuid.into(), source);
        self
    }

    /// Register an item inside a pack.
    pub fn with_pack_item(
        mut self,
        pack: impl Into<String>,
        id: impl Into<String>,
        source: AttachmentSource,
    ) -> Self {
        self.by_pack.insert((pack.into(), id.into()), source);
        self
    }
}

#[async_trait]
impl ItemCatalog for MemoryCatalog {
    async fn by_uuid(&self, uuid: &str) -> Option<AttachmentSource> {
        self.by_uuid.get(uuid).cloned()
    }

    async fn by_pack(&self, pack: &str, id: &str) -> Option<AttachmentSource> {
        self.by_pack
            .get(&(pack.to_string(), id.to_string()))
            .cloned()
    }
}
