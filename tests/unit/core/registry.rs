use super::*;
use crate::core::event::InputEvent;
use crate::core::view::{DocumentView, EventResult};

struct NullView;

impl DocumentView for NullView {
    fn handle_input(&mut self, _event: &InputEvent) -> EventResult {
        EventResult::Ignored
    }

    fn render(&mut self, _frame: &mut ratatui::Frame, _area: ratatui::layout::Rect) {}
}

fn descriptor(icon: &'static str) -> ProviderDescriptor {
    ProviderDescriptor::new(Icon(icon), |_slot, _ctx| Box::new(NullView))
}

#[test]
fn resolve_returns_registered_descriptor() {
    let mut registry = ProviderRegistry::new(descriptor("·"));
    registry.register("script", descriptor("{}"));

    assert_eq!(registry.resolve("script").icon, Icon("{}"));
    assert!(registry.is_registered("script"));
}

#[test]
fn resolve_falls_back_for_unknown_kind() {
    let mut registry = ProviderRegistry::new(descriptor("·"));
    registry.register("script", descriptor("{}"));

    assert_eq!(registry.resolve("unknownkind").icon, Icon("·"));
    assert_eq!(registry.resolve("").icon, Icon("·"));
    assert!(!registry.is_registered("unknownkind"));
}

#[test]
fn register_overwrites_existing_kind() {
    let mut registry = ProviderRegistry::new(descriptor("·"));
    registry.register("scene", descriptor("a"));
    registry.register("scene", descriptor("b"));

    assert_eq!(registry.resolve("scene").icon, Icon("b"));
}
