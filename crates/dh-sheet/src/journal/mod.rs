//! Chat records and the journal that collects them.

pub mod entry;
pub mod log;

pub use entry::{ChatKind, ChatRecord};
pub use log::Journal;
