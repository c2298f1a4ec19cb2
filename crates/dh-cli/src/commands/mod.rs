pub mod attach;
pub mod edit;
pub mod initiative;
pub mod new;
pub mod remove;
pub mod show;
pub mod test;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use dh_core::{CharacterRecord, RecordId};
use dh_sheet::adapters::{JournalPresenter, MemoryCatalog, MemoryStore, ScriptedAnswer, ScriptedDialog};
use dh_sheet::{ChatKind, ChatRecord, Ports, Sheet, SheetConfig};
use tracing::debug;

/// Options shared by every command.
pub struct Context {
    pub file: PathBuf,
    pub journal: Option<PathBuf>,
    pub config: SheetConfig,
}

/// A character loaded from its file, with a sheet bound to it.
///
/// Dialogs are answered from the command line: the answers are queued up
/// front and anything not answered counts as closed.
pub struct Session {
    pub sheet: Sheet,
    pub record: RecordId,
    store: Arc<MemoryStore>,
    presenter: Arc<JournalPresenter>,
    path: PathBuf,
    journal: Option<PathBuf>,
}

impl Session {
    pub async fn open(ctx: &Context, answers: Vec<ScriptedAnswer>) -> Result<Self, String> {
        let record = load_record(&ctx.file)?;
        let store = Arc::new(MemoryStore::new());
        let presenter = Arc::new(JournalPresenter::new());
        let id = store.insert(record).await;
        debug!(path = %ctx.file.display(), record = %id, "character loaded");
        let ports = Ports::local(
            &ctx.config,
            store.clone(),
            Arc::new(ScriptedDialog::new(answers)),
            presenter.clone(),
            MemoryCatalog::new(),
        );
        Ok(Self {
            sheet: Sheet::new(ctx.config.clone(), ports),
            record: id,
            store,
            presenter,
            path: ctx.file.clone(),
            journal: ctx.journal.clone(),
        })
    }

    pub async fn snapshot(&self) -> Result<CharacterRecord, String> {
        self.store
            .snapshot(self.record)
            .await
            .ok_or_else(|| "character vanished from the store".to_string())
    }

    /// Print the chat log, write it out if asked, and save the character.
    pub async fn finish(self) -> Result<(), String> {
        let journal = self.presenter.drain().await;
        for record in journal.entries() {
            print_chat(record);
        }
        if let Some(path) = &self.journal {
            let text = match path.extension().and_then(|e| e.to_str()) {
                Some("txt") => journal.export_text(),
                _ => journal.export_markdown(),
            };
            fs::write(path, text)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        }
        save_record(&self.path, &self.snapshot().await?)
    }
}

pub fn load_record(path: &Path) -> Result<CharacterRecord, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid character file {}: {e}", path.display()))
}

pub fn save_record(path: &Path, record: &CharacterRecord) -> Result<(), String> {
    let json = serde_json::to_string_pretty(record).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

fn print_chat(record: &ChatRecord) {
    println!("  {} {}", record.header.bold(), format!("[{}]", record.speaker).dimmed());
    for line in &record.body {
        println!("    {line}");
    }
    if !record.result_summary.is_empty() {
        let summary = match (record.kind, record.tags.get("success").and_then(|v| v.as_bool())) {
            (ChatKind::Test, Some(true)) => record.result_summary.green().bold(),
            (ChatKind::Test, Some(false)) => record.result_summary.red().bold(),
            _ => record.result_summary.bold(),
        };
        println!("    {summary}");
    }
    println!();
}
