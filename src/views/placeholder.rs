//! Placeholder panel view.
//!
//! Used for panel slots (tree, files, scene, inspector) and by the default
//! provider for unknown kinds. No state, consumes no input.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::event::InputEvent;
use crate::core::registry::Icon;
use crate::core::slot::SlotId;
use crate::core::view::{DocumentView, EventResult};

pub struct PlaceholderView {
    title: String,
    icon: Icon,
}

impl PlaceholderView {
    pub fn new(slot: &SlotId, icon: Icon) -> Self {
        Self {
            title: slot.label(),
            icon,
        }
    }
}

impl DocumentView for PlaceholderView {
    fn handle_input(&mut self, _event: &InputEvent) -> EventResult {
        EventResult::Ignored
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let body = Paragraph::new(Line::from(format!("{} {}", self.icon.0, self.title)))
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, area);
    }
}
