//! Content provider registry: kind -> provider descriptor dispatch table.
//!
//! Resolution is total: unregistered kinds (including the empty-kind
//! sentinel) fall back to a fixed default descriptor with a generic icon and
//! a placeholder renderer. Registration happens once during initialization;
//! descriptors are immutable afterwards.

use std::rc::Rc;

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use super::slot::SlotId;
use super::view::DocumentView;
use crate::services::document::DocumentStore;

/// Glyph shown in the tab title, next to the slot label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon(pub &'static str);

/// Capabilities a renderer may bind its view to.
pub struct ProviderContext {
    pub documents: Rc<dyn DocumentStore>,
}

pub type RenderDocument = Rc<dyn Fn(&SlotId, &ProviderContext) -> Box<dyn DocumentView>>;

#[derive(Clone)]
pub struct ProviderDescriptor {
    pub icon: Icon,
    pub render: RenderDocument,
}

impl ProviderDescriptor {
    pub fn new(
        icon: Icon,
        render: impl Fn(&SlotId, &ProviderContext) -> Box<dyn DocumentView> + 'static,
    ) -> Self {
        Self {
            icon,
            render: Rc::new(render),
        }
    }
}

pub struct ProviderRegistry {
    providers: FxHashMap<CompactString, ProviderDescriptor>,
    fallback: ProviderDescriptor,
}

impl ProviderRegistry {
    pub fn new(fallback: ProviderDescriptor) -> Self {
        Self {
            providers: FxHashMap::default(),
            fallback,
        }
    }

    /// Insert or overwrite. Initialization-time only.
    pub fn register(&mut self, kind: impl Into<CompactString>, descriptor: ProviderDescriptor) {
        self.providers.insert(kind.into(), descriptor);
    }

    /// Exact-match lookup with fallback. Total, never errors.
    pub fn resolve(&self, kind: &str) -> &ProviderDescriptor {
        self.providers.get(kind).unwrap_or(&self.fallback)
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.providers.contains_key(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/registry.rs"]
mod tests;
