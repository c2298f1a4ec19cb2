//! The sheet facade: configuration, ports and the workflow lock.
//!
//! Each workflow lives in its own module under [`crate::workflow`] as an
//! `impl Sheet` block.

use std::future::Future;
use std::sync::Arc;

use dh_core::{CharacterRecord, RecordId};

use crate::adapters::{JournalPresenter, MemoryCatalog, MemoryStore, SeededDice};
use crate::config::SheetConfig;
use crate::error::SheetResult;
use crate::lock::WorkflowLocks;
use crate::ports::{
    AttachmentStore, DiceOracle, DialogOutcome, DialogPrompt, ItemCatalog, LogPresenter,
    RecordStore,
};
use crate::view::SheetView;

/// The host capabilities a sheet works through.
#[derive(Clone)]
pub struct Ports {
    /// Dice evaluation.
    pub dice: Arc<dyn DiceOracle>,
    /// Record reads and field updates.
    pub records: Arc<dyn RecordStore>,
    /// Attachment create/remove/list.
    pub attachments: Arc<dyn AttachmentStore>,
    /// User dialogs.
    pub dialog: Arc<dyn DialogPrompt>,
    /// Chat log.
    pub log: Arc<dyn LogPresenter>,
    /// Drop reference resolution.
    pub catalog: Arc<dyn ItemCatalog>,
}

impl Ports {
    /// Ports backed by in-process adapters sharing one store.
    pub fn local(
        config: &SheetConfig,
        store: Arc<MemoryStore>,
        dialog: Arc<dyn DialogPrompt>,
        presenter: Arc<JournalPresenter>,
        catalog: MemoryCatalog,
    ) -> Self {
        Self {
            dice: Arc::new(SeededDice::new(config.seed)),
            records: store.clone(),
            attachments: store,
            dialog,
            log: presenter,
            catalog: Arc::new(catalog),
        }
    }
}

/// A character sheet bound to a set of host ports.
pub struct Sheet {
    pub(crate) config: SheetConfig,
    pub(crate) ports: Ports,
    pub(crate) locks: WorkflowLocks,
}

impl Sheet {
    /// Create a sheet.
    pub fn new(config: SheetConfig, ports: Ports) -> Self {
        Self {
            config,
            ports,
            locks: WorkflowLocks::new(),
        }
    }

    /// The sheet's configuration.
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// The sheet's ports.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Fetch a record.
    pub async fn record(&self, id: RecordId) -> SheetResult<CharacterRecord> {
        Ok(self.ports.records.get(id).await?)
    }

    /// Build the display model of a record.
    pub async fn view(&self, id: RecordId) -> SheetResult<SheetView> {
        Ok(SheetView::from_record(&self.record(id).await?))
    }

    /// Wait for a dialog, applying the configured timeout.
    pub(crate) async fn ask<T>(
        &self,
        dialog: impl Future<Output = DialogOutcome<T>>,
    ) -> DialogOutcome<T> {
        match self.config.dialog_timeout {
            Some(limit) => tokio::time::timeout(limit, dialog)
                .await
                .unwrap_or(DialogOutcome::TimedOut),
            None => dialog.await,
        }
    }
}
