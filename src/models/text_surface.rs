//! Rope-backed editing surface.
//!
//! Reference implementation of [`EditingSurface`]: a rope with a char
//! cursor, snapshot-based internal undo/redo, and synchronous change/blur
//! listeners. External content replacement goes through the same snapshot
//! path as user edits, so the surface's own history and cursor survive it.

use ropey::Rope;
use slotmap::SlotMap;
use unicode_width::UnicodeWidthChar;

use crate::core::surface::{
    BlurListener, ChangeListener, EditingSurface, Geometry, ListenerKey, SurfaceConfig,
};

#[derive(Clone)]
struct Snapshot {
    rope: Rope,
    cursor: usize,
}

enum AnyListener {
    Change(ChangeListener),
    Blur(BlurListener),
}

pub struct TextSurface {
    rope: Rope,
    /// Char index into the rope.
    cursor: usize,
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    /// Bumped on every content mutation, including external replacement.
    revision: u64,
    listeners: SlotMap<ListenerKey, AnyListener>,
    config: SurfaceConfig,
    geometry: Geometry,
    focused: bool,
    disposed: bool,
}

impl TextSurface {
    pub fn new(seed: &str) -> Self {
        Self {
            rope: Rope::from_str(seed),
            cursor: 0,
            undo: Vec::new(),
            redo: Vec::new(),
            revision: 0,
            listeners: SlotMap::with_key(),
            config: SurfaceConfig::default(),
            geometry: Geometry::default(),
            focused: false,
            disposed: false,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line(&self, index: usize) -> String {
        if index >= self.rope.len_lines() {
            return String::new();
        }
        let line = self.rope.line(index);
        let mut text = line.to_string();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        text
    }

    /// Cursor position as (line, display column), column in terminal cells.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.cursor);
        let line_start = self.rope.line_to_char(line);
        let col = self
            .rope
            .slice(line_start..self.cursor)
            .chars()
            .map(|ch| ch.width().unwrap_or(0))
            .sum();
        (line, col)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            rope: self.rope.clone(),
            cursor: self.cursor,
        }
    }

    fn emit_change(&mut self) {
        self.revision += 1;
        let text = self.rope.to_string();
        let listeners: Vec<ChangeListener> = self
            .listeners
            .values()
            .filter_map(|l| match l {
                AnyListener::Change(l) => Some(l.clone()),
                AnyListener::Blur(_) => None,
            })
            .collect();
        for listener in listeners {
            listener(&text);
        }
    }

    fn begin_edit(&mut self) {
        self.undo.push(self.snapshot());
        self.redo.clear();
    }

    pub fn insert_char(&mut self, ch: char) {
        if self.disposed {
            return;
        }
        self.begin_edit();
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
        self.emit_change();
    }

    pub fn insert_str(&mut self, text: &str) {
        if self.disposed || text.is_empty() {
            return;
        }
        self.begin_edit();
        self.rope.insert(self.cursor, text);
        self.cursor += text.chars().count();
        self.emit_change();
    }

    pub fn backspace(&mut self) {
        if self.disposed || self.cursor == 0 {
            return;
        }
        self.begin_edit();
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        self.emit_change();
    }

    pub fn delete_forward(&mut self) {
        if self.disposed || self.cursor >= self.rope.len_chars() {
            return;
        }
        self.begin_edit();
        self.rope.remove(self.cursor..self.cursor + 1);
        self.emit_change();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.rope.len_chars() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        let (line, _) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        let offset = self.cursor - self.rope.line_to_char(line);
        let prev_start = self.rope.line_to_char(line - 1);
        let prev_len = self.line(line - 1).chars().count();
        self.cursor = prev_start + offset.min(prev_len);
    }

    pub fn move_down(&mut self) {
        let (line, _) = self.cursor_line_col();
        if line + 1 >= self.rope.len_lines() {
            return;
        }
        let offset = self.cursor - self.rope.line_to_char(line);
        let next_start = self.rope.line_to_char(line + 1);
        let next_len = self.line(line + 1).chars().count();
        self.cursor = next_start + offset.min(next_len);
    }

    /// Surface-local undo, independent of project-level time travel.
    pub fn undo_edit(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(snapshot) = self.undo.pop() {
            self.redo.push(self.snapshot());
            self.rope = snapshot.rope;
            self.cursor = snapshot.cursor;
            self.emit_change();
        }
    }

    pub fn redo_edit(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(snapshot) = self.redo.pop() {
            self.undo.push(self.snapshot());
            self.rope = snapshot.rope;
            self.cursor = snapshot.cursor;
            self.emit_change();
        }
    }
}

impl EditingSurface for TextSurface {
    fn contents(&self) -> String {
        self.rope.to_string()
    }

    fn replace_contents(&mut self, text: &str) {
        if self.disposed {
            return;
        }
        if self.rope == text {
            return;
        }
        // Same snapshot path as user edits: history survives, cursor clamps.
        self.begin_edit();
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.rope.len_chars());
        self.emit_change();
    }

    fn subscribe_change(&mut self, listener: ChangeListener) -> ListenerKey {
        self.listeners.insert(AnyListener::Change(listener))
    }

    fn subscribe_blur(&mut self, listener: BlurListener) -> ListenerKey {
        self.listeners.insert(AnyListener::Blur(listener))
    }

    fn unsubscribe(&mut self, key: ListenerKey) {
        self.listeners.remove(key);
    }

    fn apply_config(&mut self, config: &SurfaceConfig) {
        self.config = config.clone();
    }

    fn reflow(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn focus(&mut self) {
        if !self.disposed {
            self.focused = true;
        }
    }

    fn blur(&mut self) {
        if self.disposed {
            return;
        }
        self.focused = false;
        let listeners: Vec<BlurListener> = self
            .listeners
            .values()
            .filter_map(|l| match l {
                AnyListener::Blur(l) => Some(l.clone()),
                AnyListener::Change(_) => None,
            })
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.focused = false;
        self.listeners.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/text_surface.rs"]
mod tests;
