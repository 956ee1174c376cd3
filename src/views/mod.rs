//! View layer: DocumentView implementations.

pub mod placeholder;
pub mod script;

pub use placeholder::PlaceholderView;
pub use script::ScriptView;
