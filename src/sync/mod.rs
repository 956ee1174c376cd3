//! Content synchronization engine.

pub mod engine;

pub use engine::{SyncEngine, SyncGuard, SyncPhase};
