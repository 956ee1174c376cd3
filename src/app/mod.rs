//! Application layer: workbench tab host and layout description.

pub mod layout;
pub mod workbench;

pub use layout::{default_layout, GroupSpec, LayoutSpec};
pub use workbench::{default_registry, OpenTab, TabGroup, Workbench};
