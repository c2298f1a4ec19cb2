//! Host capability ports.
//!
//! Everything the sheet needs from its host goes through these traits:
//! dice evaluation, record storage, dialogs, the chat log and the item
//! catalog. Workflows depend only on the traits, so any host (or a test)
//! can supply its own implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dh_core::{
    Attachment, AttachmentId, AttachmentSource, CharacterRecord, Characteristic, Characteristics,
    FieldUpdate, RecordId,
};
use dh_mechanics::{DieResult, PointBuy};
use serde::{Deserialize, Serialize};

use crate::error::PortResult;
use crate::journal::ChatRecord;

/// The result of evaluating a dice formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The formula as evaluated.
    pub formula: String,
    /// Final total.
    pub total: i32,
    /// Every die rolled, dropped ones included.
    pub breakdown: Vec<DieResult>,
}

impl Evaluation {
    /// An evaluation with a bare total and no dice, for hosts that only report totals.
    pub fn total_only(formula: impl Into<String>, total: i32) -> Self {
        Self {
            formula: formula.into(),
            total,
            breakdown: Vec::new(),
        }
    }
}

/// One button of a choice dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Value returned when chosen.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create an option.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// How a dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// The user made a choice.
    Chosen(T),
    /// The user closed the dialog without choosing.
    Dismissed,
    /// Nobody answered in time.
    TimedOut,
}

impl<T> DialogOutcome<T> {
    /// The chosen value, if any.
    pub fn chosen(self) -> Option<T> {
        match self {
            Self::Chosen(value) => Some(value),
            Self::Dismissed | Self::TimedOut => None,
        }
    }

    /// Transform the chosen value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DialogOutcome<U> {
        match self {
            Self::Chosen(value) => DialogOutcome::Chosen(f(value)),
            Self::Dismissed => DialogOutcome::Dismissed,
            Self::TimedOut => DialogOutcome::TimedOut,
        }
    }
}

/// Raw input of the characteristic edit form, keyed by characteristic.
pub type CharacteristicForm = BTreeMap<Characteristic, String>;

/// Evaluates dice formulas.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiceOracle: Send + Sync {
    /// Evaluate a formula. Fails on a malformed formula.
    async fn evaluate(&self, formula: &str) -> PortResult<Evaluation>;
}

/// Reads and updates character records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a record.
    async fn get(&self, id: RecordId) -> PortResult<CharacterRecord>;
    /// Apply a batched field-path update atomically.
    async fn update(&self, id: RecordId, update: FieldUpdate) -> PortResult<()>;
}

/// Creates, removes and lists a record's attachments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Attach a profile, returning its ID.
    async fn create(&self, record: RecordId, attachment: Attachment) -> PortResult<AttachmentId>;
    /// Remove an attachment.
    async fn remove(&self, record: RecordId, attachment: AttachmentId) -> PortResult<()>;
    /// All attachments, in insertion order.
    async fn list(&self, record: RecordId) -> PortResult<Vec<Attachment>>;
    /// Apply a batched edit to one attachment's profile.
    async fn update(
        &self,
        record: RecordId,
        attachment: AttachmentId,
        update: FieldUpdate,
    ) -> PortResult<()>;
}

/// Shows dialogs to the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogPrompt: Send + Sync {
    /// Ask for one of several options. Resolves with the chosen option's id.
    async fn choice(&self, title: &str, options: &[ChoiceOption]) -> DialogOutcome<String>;
    /// Let the user distribute point-buy points. Resolves with the balanced allocation.
    async fn point_buy(&self, allocation: PointBuy) -> DialogOutcome<PointBuy>;
    /// Let the user edit characteristic values as free text.
    async fn characteristic_form(&self, current: Characteristics) -> DialogOutcome<CharacteristicForm>;
}

/// Posts records to the chat log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogPresenter: Send + Sync {
    /// Post a record. Presentation only; never fails.
    async fn emit(&self, record: ChatRecord);
}

/// Resolves dropped item references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Look up an item by its universal id.
    async fn by_uuid(&self, uuid: &str) -> Option<AttachmentSource>;
    /// Look up an item inside a compendium pack.
    async fn by_pack(&self, pack: &str, id: &str) -> Option<AttachmentSource>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_helpers() {
        assert_eq!(DialogOutcome::Chosen(3).chosen(), Some(3));
        assert_eq!(DialogOutcome::<i32>::Dismissed.chosen(), None);
        assert_eq!(DialogOutcome::Chosen(2).map(|n| n * 2), DialogOutcome::Chosen(4));
        assert_eq!(
            DialogOutcome::<i32>::TimedOut.map(|n| n * 2),
            DialogOutcome::TimedOut
        );
    }
}
