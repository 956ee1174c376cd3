//! View system: DocumentView trait definition.
//!
//! Every tab content implements this trait. Lifetime contract: the host
//! calls `on_close` exactly once before dropping the view; `on_blur` fires
//! whenever the slot loses focus.

use ratatui::layout::Rect;
use ratatui::Frame;

use super::event::InputEvent;

pub trait DocumentView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn on_focus(&mut self) {}

    fn on_blur(&mut self) {}

    fn on_close(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }
}
