//! Sheet workflows.

pub mod check;
pub mod drop;
pub mod edit;
pub mod initiative;
pub mod origin;
pub mod removal;

pub use drop::{AttachReport, DropPayload};
pub use edit::{TrackField, coerce_characteristic, coerce_count};
pub use origin::{BlessingRoll, Interruption, OriginReport, OriginStage};
pub use removal::Removal;
