//! Project state: the undoable files slice plus non-undoable UI state.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::undo::Undoable;

/// Metadata for one project file. Names are encoded slot identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: CompactString,
}

/// Ordered file list plus by-name lookup. Single writer: the kernel store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilesState {
    pub names: Vec<CompactString>,
    pub by_name: FxHashMap<CompactString, FileMeta>,
}

impl FilesState {
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn insert(&mut self, name: CompactString) -> bool {
        if self.by_name.contains_key(&name) {
            return false;
        }
        self.names.push(name.clone());
        self.by_name.insert(name.clone(), FileMeta { name });
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        if self.by_name.remove(name).is_none() {
            return false;
        }
        self.names.retain(|n| n != name);
        true
    }

    pub fn rename(&mut self, from: &str, to: CompactString) -> bool {
        if !self.by_name.contains_key(from) || self.by_name.contains_key(&to) {
            return false;
        }
        self.by_name.remove(from);
        self.by_name.insert(to.clone(), FileMeta { name: to.clone() });
        if let Some(slot) = self.names.iter_mut().find(|n| n.as_str() == from) {
            *slot = to;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Dark
    }
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    Fr,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fr
    }
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Fr => Locale::En,
            Locale::En => Locale::Fr,
        }
    }
}

/// Aggregate project state. Only `files` is wrapped for time travel; theme
/// and locale changes never touch the undo stacks and undo/redo never touch
/// theme or locale.
#[derive(Debug, Clone)]
pub struct ProjectState {
    pub files: Undoable<FilesState>,
    pub color_scheme: ColorScheme,
    pub locale: Locale,
}

impl ProjectState {
    pub fn new() -> Self {
        Self {
            files: Undoable::new(FilesState::default()),
            color_scheme: ColorScheme::default(),
            locale: Locale::default(),
        }
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new()
    }
}
