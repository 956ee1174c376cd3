//! Editing surface capability contract.
//!
//! Any text-editing widget that can be seeded, atomically replaced, observed
//! for content changes and blur, reflowed, and disposed satisfies this
//! contract and can sit under a [`crate::sync::SyncEngine`].

use std::rc::Rc;

use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    /// Key handed back by listener registration, usable for removal.
    pub struct ListenerKey;
}

/// Measured geometry of the hosting container, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Display options pushed into a surface without affecting content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub show_line_numbers: bool,
    pub tab_width: u8,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            tab_width: 4,
        }
    }
}

#[derive(Debug, Error)]
#[error("editing surface failed to initialize: {0}")]
pub struct SurfaceInitError(pub String);

/// Content-change listeners receive the surface's full resulting content.
pub type ChangeListener = Rc<dyn Fn(&str)>;
pub type BlurListener = Rc<dyn Fn()>;

pub trait EditingSurface {
    fn contents(&self) -> String;

    /// Atomic full-content replacement. Must preserve the surface's internal
    /// undo history and keep the cursor restorable (clamped to the new
    /// content), and must notify change listeners exactly once.
    fn replace_contents(&mut self, text: &str);

    fn subscribe_change(&mut self, listener: ChangeListener) -> ListenerKey;

    fn subscribe_blur(&mut self, listener: BlurListener) -> ListenerKey;

    fn unsubscribe(&mut self, key: ListenerKey);

    fn apply_config(&mut self, config: &SurfaceConfig);

    /// Re-flow to new container geometry. Never touches content.
    fn reflow(&mut self, geometry: Geometry);

    fn focus(&mut self);

    /// Fires blur listeners. Called by the host when focus leaves the slot.
    fn blur(&mut self);

    /// Terminal. Releases listeners; later calls on the surface are no-ops.
    fn dispose(&mut self);
}
