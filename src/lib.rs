//! dockbench - tiled editor workspace shell
//!
//! Module structure:
//! - core: framework abstractions (SlotId, ProviderRegistry, EditingSurface, DocumentView)
//! - kernel: headless project state (Store, Action, Effect, Undoable)
//! - models: concrete data models (TextSurface)
//! - services: capability adapters (DocumentStore)
//! - sync: content synchronization engine binding a surface to a document key
//! - views: document view implementations (ScriptView, PlaceholderView)
//! - app: workbench tab host and layout description

pub mod app;
pub mod core;
pub mod kernel;
pub mod logging;
pub mod models;
pub mod services;
pub mod sync;
pub mod views;
