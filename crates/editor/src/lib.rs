//! Step-list editor: the authoritative in-session ordered list of steps
//! for one play.
//!
//! The editor mediates between user edits (rename, describe, assign,
//! reorder, delete, append) and persistence. Steps created in-session
//! carry pending ids until a bulk save creates them server-side and a
//! reload swaps in the real ids.

pub mod editor;
pub mod error;
pub mod store;

pub use editor::StepListEditor;
pub use error::EditorError;
pub use store::{RemoteStepStore, StepStore};
