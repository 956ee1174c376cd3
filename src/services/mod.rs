//! Service layer: external capability adapters.

pub mod document;

pub use document::{DocumentStore, MemoryDocumentStore, StoreWriteError, Subscription};
