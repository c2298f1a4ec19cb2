//! In-process implementations of the host ports.
//!
//! Used by the CLI and by tests; a real tabletop host provides its own.

pub mod catalog;
pub mod dialog;
pub mod dice;
pub mod presenter;
pub mod store;

pub use catalog::MemoryCatalog;
pub use dialog::{ScriptedAnswer, ScriptedDialog};
pub use dice::SeededDice;
pub use presenter::JournalPresenter;
pub use store::MemoryStore;
