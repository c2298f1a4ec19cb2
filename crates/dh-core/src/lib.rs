//! Core types for DH2e: characteristics, character records, and attachments.
//!
//! This crate defines the data model the sheet layer mutates. It has no
//! notion of dice or dialogs. Records are changed only through batched
//! [`FieldUpdate`]s, which the host applies atomically.

/// Attached profiles (origin, tendency) and their creation payloads.
pub mod attachment;
/// The ten characteristics and their shared label table.
pub mod characteristic;
/// Error types used throughout the crate.
pub mod error;
/// Field-path values and batched updates.
pub mod field;
/// The character record and its identifiers.
pub mod record;
/// Wound and fate counters.
pub mod track;

/// Re-export attachment types.
pub use attachment::{
    Attachment, AttachmentId, AttachmentKind, AttachmentSource, OriginProfile, Profile,
    TendencyProfile,
};
/// Re-export characteristic types.
pub use characteristic::{Characteristic, CharacteristicInfo, Characteristics};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export field update types.
pub use field::{FieldUpdate, FieldValue};
/// Re-export record types.
pub use record::{CharacterRecord, RecordId};
/// Re-export track types.
pub use track::Track;
