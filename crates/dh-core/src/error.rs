use crate::attachment::AttachmentId;
use crate::record::RecordId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading or mutating records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested record does not exist.
    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    /// The requested attachment does not exist on the record.
    #[error("attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),

    /// A field path in an update is not known.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A field was given a value of the wrong type.
    #[error("field {path} expects {expected}, got {found}")]
    FieldType {
        /// The field path.
        path: String,
        /// The expected value type.
        expected: &'static str,
        /// The value that was supplied.
        found: String,
    },

    /// A profile field was changed while the profile is not editable.
    #[error("profile \"{0}\" is locked")]
    Locked(String),

    /// An attachment payload could not be interpreted.
    #[error("invalid profile data: {0}")]
    InvalidProfile(String),
}
