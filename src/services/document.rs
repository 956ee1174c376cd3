//! Document value store capability.
//!
//! Per-document persisted value, keyed by the full encoded slot identifier
//! (`script::mario`), with change notification. The trait is the boundary;
//! [`MemoryDocumentStore`] is the single-threaded reference implementation,
//! with JSON load/save standing in for durable storage.

use std::cell::RefCell;
use std::path::Path;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    struct DocListenerKey;
}

#[derive(Debug, Error)]
#[error("document store rejected write for `{key}`: {reason}")]
pub struct StoreWriteError {
    pub key: String,
    pub reason: String,
}

type DocListener = Rc<dyn Fn(&str)>;

pub trait DocumentStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreWriteError>;

    /// Listeners run synchronously on every write to `key`, including writes
    /// that do not change the stored value. The subscription is released
    /// when the returned handle is dropped.
    fn subscribe(&self, key: &str, listener: Box<dyn Fn(&str)>) -> Subscription;
}

/// Drop guard for a store subscription. Cancellation is synchronous: after
/// drop, no further notifications reach the listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that was never wired; dropping it does nothing.
    pub fn detached() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Default)]
struct StoreInner {
    values: FxHashMap<String, String>,
    listeners: FxHashMap<String, SlotMap<DocListenerKey, DocListener>>,
}

/// In-memory document store. Clones share the same underlying map, so the
/// app and every engine can hold the store by value.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a flat JSON object of key -> content. Missing file yields an
    /// empty store; malformed content is an error.
    pub fn load_json(path: &Path) -> std::io::Result<Self> {
        let store = Self::new();
        if !path.exists() {
            return Ok(store);
        }
        let raw = std::fs::read_to_string(path)?;
        let values: FxHashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        store.inner.borrow_mut().values = values;
        Ok(store)
    }

    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let inner = self.inner.borrow();
        let raw = serde_json::to_string_pretty(&inner.values)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, raw)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().values.is_empty()
    }

    fn notify(&self, key: &str, value: &str) {
        // Snapshot the listeners so one of them may subscribe, unsubscribe,
        // or write back into the store without re-entering the borrow.
        let snapshot: Vec<DocListener> = {
            let inner = self.inner.borrow();
            match inner.listeners.get(key) {
                Some(listeners) => listeners.values().cloned().collect(),
                None => return,
            }
        };
        for listener in snapshot {
            listener(value);
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreWriteError> {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        self.notify(key, value);
        Ok(())
    }

    fn subscribe(&self, key: &str, listener: Box<dyn Fn(&str)>) -> Subscription {
        let token = self
            .inner
            .borrow_mut()
            .listeners
            .entry(key.to_string())
            .or_default()
            .insert(Rc::from(listener));

        let weak: Weak<RefCell<StoreInner>> = Rc::downgrade(&self.inner);
        let key = key.to_string();
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Some(listeners) = inner.borrow_mut().listeners.get_mut(&key) {
                    listeners.remove(token);
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/document.rs"]
mod tests;
