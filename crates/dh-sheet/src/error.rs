//! Error types for the sheet layer.

use dh_core::{AttachmentId, CoreError, RecordId};
use dh_mechanics::MechError;

/// Errors reported by a host capability port.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The dice oracle could not evaluate a formula.
    #[error("cannot evaluate {formula:?}: {message}")]
    Evaluation {
        /// The formula that failed.
        formula: String,
        /// Why it failed.
        message: String,
    },

    /// A record or attachment the port was asked for does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of the missing entity.
        entity: &'static str,
        /// Its identifier.
        id: String,
    },

    /// The store rejected an update.
    #[error(transparent)]
    Rejected(#[from] CoreError),
}

impl PortError {
    /// A not-found error with entity context.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result alias for port calls.
pub type PortResult<T> = Result<T, PortError>;

/// Errors that can occur while running a sheet workflow.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// A data model error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rules error.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// A host port failed.
    #[error(transparent)]
    Port(#[from] PortError),

    /// Another workflow is already running on this record.
    #[error("a workflow is already running on record {0}")]
    WorkflowBusy(RecordId),

    /// The attachment is not an origin profile.
    #[error("attachment {0} is not an origin profile")]
    NotAnOrigin(AttachmentId),
}

/// Result alias for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
