//! Character sheet workflows for Dark Heresy 2nd Edition.
//!
//! The sheet talks to its host only through the capability traits in
//! [`ports`]: a dice oracle, record and attachment stores, dialogs, a chat
//! log and an item catalog. [`adapters`] has in-process implementations of
//! each. The workflows (tests, origin application, removal, drops, edits,
//! initiative) are methods on [`Sheet`].

/// In-process port implementations.
pub mod adapters;
/// Sheet configuration.
pub mod config;
/// Error types.
pub mod error;
/// Chat records and the journal.
pub mod journal;
/// Per-record workflow lock.
pub mod lock;
/// Host capability ports.
pub mod ports;
/// The sheet facade.
pub mod sheet;
/// Display model.
pub mod view;
/// Sheet workflows.
pub mod workflow;

pub use config::SheetConfig;
pub use error::{PortError, PortResult, SheetError, SheetResult};
pub use journal::{ChatKind, ChatRecord, Journal};
pub use ports::{ChoiceOption, DialogOutcome, Evaluation};
pub use sheet::{Ports, Sheet};
pub use view::SheetView;
pub use workflow::{
    AttachReport, DropPayload, Interruption, OriginReport, OriginStage, Removal, TrackField,
};
