//! Per-slot content synchronization engine.
//!
//! Reconciles two independently mutating sources of truth, the document
//! value store and a live editing surface, under synchronous and possibly
//! overlapping events, with exactly-once propagation in both directions:
//!
//! - external value push: store -> surface, via one atomic content
//!   replacement, guarded so the surface's resulting change notification is
//!   not echoed back into the store;
//! - surface-originated edit: surface -> store, forwarded once with the
//!   surface's full resulting content.
//!
//! Echo and idempotence checks compare against a `last_seen` mirror of the
//! surface content owned by the engine, so a surface-originated write that
//! synchronously re-notifies the engine never re-enters the surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::slot::SlotId;
use crate::core::surface::{EditingSurface, Geometry, SurfaceConfig, SurfaceInitError};
use crate::services::document::{DocumentStore, Subscription};

/// Reentrancy guard, one per engine. `Disposed` doubles as the liveness
/// check suppressing stale notifications delivered after teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncGuard {
    Idle,
    ApplyingExternal,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Unmounted,
    /// Also the resting state after a failed surface init: the slot renders
    /// degraded and only a close/reopen produces a fresh mount.
    Mounting,
    Synced,
    Disposed,
}

struct EngineShared {
    key: String,
    guard: Cell<SyncGuard>,
    /// Mirror of the surface content: updated on every accepted surface
    /// change and every applied external push.
    last_seen: RefCell<String>,
    unsynced: Cell<bool>,
    store: Rc<dyn DocumentStore>,
    on_blur: RefCell<Option<Rc<dyn Fn()>>>,
}

pub struct SyncEngine<S: EditingSurface + 'static> {
    slot: SlotId,
    shared: Rc<EngineShared>,
    surface: Option<Rc<RefCell<S>>>,
    store_sub: Option<Subscription>,
    phase: SyncPhase,
    autofocus: bool,
}

impl<S: EditingSurface + 'static> SyncEngine<S> {
    pub fn new(slot: SlotId, store: Rc<dyn DocumentStore>) -> Self {
        let key = slot.encode();
        Self {
            slot,
            shared: Rc::new(EngineShared {
                key,
                guard: Cell::new(SyncGuard::Idle),
                last_seen: RefCell::new(String::new()),
                unsynced: Cell::new(false),
                store,
                on_blur: RefCell::new(None),
            }),
            surface: None,
            store_sub: None,
            phase: SyncPhase::Unmounted,
            autofocus: false,
        }
    }

    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    pub fn slot(&self) -> &SlotId {
        &self.slot
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// True when the last surface-originated write was rejected by the
    /// store; content stays visible in the surface but is not persisted.
    pub fn is_unsynced(&self) -> bool {
        self.shared.unsynced.get()
    }

    pub fn set_on_blur(&self, callback: impl Fn() + 'static) {
        *self.shared.on_blur.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn surface(&self) -> Option<&Rc<RefCell<S>>> {
        self.surface.as_ref()
    }

    /// Mounts the slot: reads the current document value (empty default),
    /// builds the surface seeded with it, and wires both directions.
    /// Idempotent: a second call while a handle exists (or after a failed
    /// init, or after dispose) is a no-op.
    pub fn mount(
        &mut self,
        init: impl FnOnce(&str) -> Result<S, SurfaceInitError>,
    ) -> Result<(), SurfaceInitError> {
        if self.phase != SyncPhase::Unmounted {
            return Ok(());
        }
        self.phase = SyncPhase::Mounting;

        let seed = self
            .shared
            .store
            .get(&self.shared.key)
            .unwrap_or_default();
        let surface = match init(&seed) {
            Ok(surface) => Rc::new(RefCell::new(surface)),
            Err(err) => {
                warn!(slot = %self.slot, error = %err, "surface init failed; slot degraded");
                return Err(err);
            }
        };
        *self.shared.last_seen.borrow_mut() = seed;

        // Surface -> store: forward accepted edits exactly once.
        {
            let shared = Rc::clone(&self.shared);
            surface
                .borrow_mut()
                .subscribe_change(Rc::new(move |text: &str| match shared.guard.get() {
                    SyncGuard::ApplyingExternal | SyncGuard::Disposed => {}
                    SyncGuard::Idle => {
                        *shared.last_seen.borrow_mut() = text.to_string();
                        match shared.store.set(&shared.key, text) {
                            Ok(()) => shared.unsynced.set(false),
                            Err(err) => {
                                shared.unsynced.set(true);
                                warn!(key = %shared.key, error = %err, "document write failed; content kept locally");
                            }
                        }
                    }
                }));
        }

        // Blur: forwarded verbatim to the registered callback, if any.
        {
            let shared = Rc::clone(&self.shared);
            surface.borrow_mut().subscribe_blur(Rc::new(move || {
                if shared.guard.get() == SyncGuard::Disposed {
                    return;
                }
                let callback = shared.on_blur.borrow().clone();
                if let Some(callback) = callback {
                    callback();
                }
            }));
        }

        // Store -> surface: apply external pushes under the guard.
        let store_sub = {
            let shared = Rc::clone(&self.shared);
            let surface = Rc::clone(&surface);
            self.shared.store.subscribe(
                &self.shared.key,
                Box::new(move |value: &str| {
                    if shared.guard.get() == SyncGuard::Disposed {
                        return;
                    }
                    let unchanged = *shared.last_seen.borrow() == value;
                    if unchanged {
                        return;
                    }
                    shared.guard.set(SyncGuard::ApplyingExternal);
                    surface.borrow_mut().replace_contents(value);
                    *shared.last_seen.borrow_mut() = value.to_string();
                    shared.guard.set(SyncGuard::Idle);
                }),
            )
        };
        self.store_sub = Some(store_sub);

        if self.autofocus {
            surface.borrow_mut().focus();
        }
        self.surface = Some(surface);
        self.phase = SyncPhase::Synced;
        debug!(slot = %self.slot, "slot mounted");
        Ok(())
    }

    /// Pushes display options into the surface. Content and guard untouched.
    pub fn apply_config(&self, config: &SurfaceConfig) {
        if let Some(surface) = &self.surface {
            surface.borrow_mut().apply_config(config);
        }
    }

    /// Asks the surface to re-flow to new container geometry.
    pub fn reflow(&self, geometry: Geometry) {
        if let Some(surface) = &self.surface {
            surface.borrow_mut().reflow(geometry);
        }
    }

    pub fn blur(&self) {
        if let Some(surface) = &self.surface {
            surface.borrow_mut().blur();
        }
    }

    /// Terminal. Suppresses in-flight notifications via the disposed
    /// sentinel, releases the store subscription, and disposes the surface.
    /// Safe to call before mount and more than once.
    pub fn dispose(&mut self) {
        if self.phase == SyncPhase::Disposed {
            return;
        }
        self.shared.guard.set(SyncGuard::Disposed);
        self.store_sub = None;
        if let Some(surface) = self.surface.take() {
            surface.borrow_mut().dispose();
        }
        self.phase = SyncPhase::Disposed;
        debug!(slot = %self.slot, "slot disposed");
    }
}

/// Release on every exit path: dropping the engine disposes the slot.
impl<S: EditingSurface + 'static> Drop for SyncEngine<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/engine.rs"]
mod tests;
