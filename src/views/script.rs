//! Script editing view: a text surface kept in sync with the document store.
//!
//! The engine mounts lazily on first render, when the slot actually receives
//! a drawing area. A failed mount leaves the slot rendering a degraded
//! placeholder; remounting requires closing and reopening the tab.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::event::InputEvent;
use crate::core::slot::SlotId;
use crate::core::surface::{EditingSurface, Geometry, SurfaceInitError};
use crate::core::view::{DocumentView, EventResult};
use crate::models::TextSurface;
use crate::services::document::DocumentStore;
use crate::sync::{SyncEngine, SyncPhase};

pub struct ScriptView {
    engine: SyncEngine<TextSurface>,
    mount_failed: bool,
    geometry: Geometry,
}

impl ScriptView {
    pub fn new(slot: SlotId, documents: Rc<dyn DocumentStore>) -> Self {
        Self {
            engine: SyncEngine::new(slot, documents).with_autofocus(true),
            mount_failed: false,
            geometry: Geometry::default(),
        }
    }

    pub fn engine(&self) -> &SyncEngine<TextSurface> {
        &self.engine
    }

    fn ensure_mounted(&mut self) {
        if self.engine.phase() != SyncPhase::Unmounted {
            return;
        }
        if self
            .engine
            .mount(|seed| Ok::<_, SurfaceInitError>(TextSurface::new(seed)))
            .is_err()
        {
            self.mount_failed = true;
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        let Some(surface) = self.engine.surface() else {
            return EventResult::Ignored;
        };
        let mut surface = surface.borrow_mut();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('z') if ctrl => surface.undo_edit(),
            KeyCode::Char('y') if ctrl => surface.redo_edit(),
            KeyCode::Char(ch) if !ctrl => surface.insert_char(ch),
            KeyCode::Enter => surface.insert_char('\n'),
            KeyCode::Tab => {
                let width = surface.config().tab_width as usize;
                surface.insert_str(&" ".repeat(width));
            }
            KeyCode::Backspace => surface.backspace(),
            KeyCode::Delete => surface.delete_forward(),
            KeyCode::Left => surface.move_left(),
            KeyCode::Right => surface.move_right(),
            KeyCode::Up => surface.move_up(),
            KeyCode::Down => surface.move_down(),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn render_degraded(&self, frame: &mut Frame, area: Rect) {
        let body = Paragraph::new("editing surface unavailable")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, area);
    }
}

impl DocumentView for ScriptView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => {
                if let Some(surface) = self.engine.surface() {
                    surface.borrow_mut().insert_str(text);
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.ensure_mounted();
        if self.mount_failed || self.engine.surface().is_none() {
            self.render_degraded(frame, area);
            return;
        }

        let geometry = Geometry::new(area.width, area.height);
        if geometry != self.geometry {
            self.engine.reflow(geometry);
            self.geometry = geometry;
        }

        let mut block = Block::default().borders(Borders::ALL);
        if self.engine.is_unsynced() {
            block = block.title(" not synced ");
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let surface = self
            .engine
            .surface()
            .expect("surface checked above")
            .borrow();
        let (cursor_line, cursor_col) = surface.cursor_line_col();
        let height = inner.height as usize;
        let top = cursor_line.saturating_sub(height.saturating_sub(1));

        let gutter_width = if surface.config().show_line_numbers {
            surface.line_count().to_string().len().max(2) + 1
        } else {
            0
        };

        let mut lines = Vec::with_capacity(height);
        for row in 0..height {
            let index = top + row;
            if index >= surface.line_count() {
                break;
            }
            let mut spans = Vec::with_capacity(2);
            if gutter_width > 0 {
                spans.push(Span::styled(
                    format!("{:>width$} ", index + 1, width = gutter_width - 1),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            spans.push(Span::raw(surface.line(index)));
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if surface.is_focused() {
            // Saturate rather than wrap so an overlong line parks the cursor
            // off-screen instead of at a bogus column.
            let col = u16::try_from(gutter_width + cursor_col).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(col);
            let y = inner.y.saturating_add((cursor_line - top) as u16);
            if x < inner.right() && y < inner.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn on_focus(&mut self) {
        if let Some(surface) = self.engine.surface() {
            surface.borrow_mut().focus();
        }
    }

    fn on_blur(&mut self) {
        self.engine.blur();
    }

    fn on_close(&mut self) {
        self.engine.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/script.rs"]
mod tests;
