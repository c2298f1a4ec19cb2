//! Chat record types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a chat record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    /// A characteristic test.
    Test,
    /// Wounds rolled from an origin.
    Wounds,
    /// The fate blessing roll.
    Blessing,
    /// Rolled characteristic generation.
    Generation,
    /// Committed point-buy allocation.
    PointBuy,
    /// An initiative roll.
    Initiative,
}

/// A human-readable result posted to the chat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// What this record reports.
    pub kind: ChatKind,
    /// Name of the character it concerns.
    pub speaker: String,
    /// Header line.
    pub header: String,
    /// Body lines.
    pub body: Vec<String>,
    /// One-line result.
    pub result_summary: String,
    /// Machine-readable details.
    pub tags: BTreeMap<String, serde_json::Value>,
    /// When the record was made.
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    /// Start a record with a header and nothing else.
    pub fn new(kind: ChatKind, speaker: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            kind,
            speaker: speaker.into(),
            header: header.into(),
            body: Vec::new(),
            result_summary: String::new(),
            tags: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Append a body line.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    /// Set the result line.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.result_summary = summary.into();
        self
    }

    /// Attach a machine-readable tag.
    pub fn tag(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.tags.insert(key.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let record = ChatRecord::new(ChatKind::Test, "Ada", "Weapon Skill (50)")
            .line("Roll: 35")
            .summary("Success (2 degrees)")
            .tag("target", 50)
            .tag("characteristic", "ws");
        assert_eq!(record.body, vec!["Roll: 35"]);
        assert_eq!(record.result_summary, "Success (2 degrees)");
        assert_eq!(record.tags["target"], serde_json::json!(50));
        assert_eq!(record.tags["characteristic"], serde_json::json!("ws"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ChatKind::PointBuy).unwrap();
        assert_eq!(json, "\"point_buy\"");
    }
}
