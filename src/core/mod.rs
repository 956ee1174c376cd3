//! Core framework module
//!
//! Abstractions shared by every layer:
//! - SlotId: workspace slot identifier codec
//! - ProviderRegistry: kind -> content provider dispatch table
//! - EditingSurface: contract any text-editing widget must satisfy
//! - DocumentView: contract any tab content must satisfy

pub mod event;
pub mod registry;
pub mod slot;
pub mod surface;
pub mod view;

pub use event::InputEvent;
pub use registry::{Icon, ProviderContext, ProviderDescriptor, ProviderRegistry};
pub use slot::{SlotId, KIND_SEPARATOR};
pub use surface::{
    BlurListener, ChangeListener, EditingSurface, Geometry, ListenerKey, SurfaceConfig,
    SurfaceInitError,
};
pub use view::{DocumentView, EventResult};
