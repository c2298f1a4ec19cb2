//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::ChatRecord;

/// A chronological log of chat records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<ChatRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the journal.
    pub fn append(&mut self, record: ChatRecord) {
        self.entries.push(record);
    }

    /// Get all records.
    pub fn entries(&self) -> &[ChatRecord] {
        &self.entries
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&ChatRecord> {
        self.entries.last()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Chat Log\n\n");
        for record in &self.entries {
            out.push_str(&format!("**{}** ({})\n", record.header, record.speaker));
            for line in &record.body {
                out.push_str(&format!("  {line}\n"));
            }
            if !record.result_summary.is_empty() {
                out.push_str(&format!("  **{}**\n", record.result_summary));
            }
            out.push('\n');
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Chat Log\n========\n\n");
        for record in &self.entries {
            out.push_str(&format!(
                "[{}] {}: {}\n",
                record.timestamp.format("%H:%M:%S"),
                record.speaker,
                record.header
            ));
            for line in &record.body {
                out.push_str(&format!("  {line}\n"));
            }
            if !record.result_summary.is_empty() {
                out.push_str(&format!("  = {}\n", record.result_summary));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::ChatKind;

    fn sample() -> Journal {
        let mut j = Journal::new();
        j.append(
            ChatRecord::new(ChatKind::Wounds, "Ada", "Wounds: Hive World")
                .line("Formula: 8+1d5")
                .summary("Result: 11"),
        );
        j.append(ChatRecord::new(ChatKind::Initiative, "Ada", "Initiative").summary("Result: 7"));
        j
    }

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.len(), 0);
        assert!(j.last().is_none());
    }

    #[test]
    fn append_and_query() {
        let j = sample();
        assert_eq!(j.len(), 2);
        assert_eq!(j.entries()[0].kind, ChatKind::Wounds);
        assert_eq!(j.last().map(|r| r.kind), Some(ChatKind::Initiative));
    }

    #[test]
    fn export_markdown() {
        let md = sample().export_markdown();
        assert!(md.starts_with("# Chat Log"));
        assert!(md.contains("**Wounds: Hive World** (Ada)"));
        assert!(md.contains("  Formula: 8+1d5"));
        assert!(md.contains("  **Result: 11**"));
    }

    #[test]
    fn export_text() {
        let text = sample().export_text();
        assert!(text.starts_with("Chat Log\n========"));
        assert!(text.contains("Ada: Initiative"));
        assert!(text.contains("  = Result: 7"));
    }

    #[test]
    fn serde_roundtrip_keeps_entries() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.entries()[0].header, "Wounds: Hive World");
    }
}
