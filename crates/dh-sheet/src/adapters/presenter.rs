//! Chat presenter that writes to a journal.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::journal::{ChatRecord, Journal};
use crate::ports::LogPresenter;

/// Collects every emitted record in a [`Journal`].
#[derive(Debug, Default)]
pub struct JournalPresenter {
    journal: Mutex<Journal>,
}

impl JournalPresenter {
    /// Create a presenter with an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the journal so far.
    pub async fn journal(&self) -> Journal {
        self.journal.lock().await.clone()
    }

    /// Take the journal, leaving an empty one behind.
    pub async fn drain(&self) -> Journal {
        std::mem::take(&mut *self.journal.lock().await)
    }
}

#[async_trait]
impl LogPresenter for JournalPresenter {
    async fn emit(&self, record: ChatRecord) {
        tracing::debug!(kind = ?record.kind, header = %record.header, "chat record");
        self.journal.lock().await.append(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::ChatKind;

    #[tokio::test]
    async fn collects_and_drains() {
        let presenter = JournalPresenter::new();
        presenter
            .emit(ChatRecord::new(ChatKind::Initiative, "Ada", "Initiative"))
            .await;
        assert_eq!(presenter.journal().await.len(), 1);
        assert_eq!(presenter.drain().await.len(), 1);
        assert!(presenter.journal().await.is_empty());
    }
}
