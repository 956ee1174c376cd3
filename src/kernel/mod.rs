//! Headless application core (state/action/effect).

pub mod action;
pub mod effect;
pub mod state;
pub mod store;
pub mod undo;

pub use action::{Action, FilesAction};
pub use effect::Effect;
pub use state::{ColorScheme, FileMeta, FilesState, Locale, ProjectState};
pub use store::{DispatchResult, Store};
pub use undo::Undoable;
