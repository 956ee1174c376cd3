//! Project state store: single-writer dispatch over synchronous, total,
//! deterministic reducers.

use tracing::debug;

use super::{Action, Effect, FilesAction, ProjectState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

pub struct Store {
    state: ProjectState,
}

impl Store {
    pub fn new(state: ProjectState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::Files(files_action) => self.reduce_files(files_action),
            Action::UndoFiles => DispatchResult::changed(self.state.files.undo()),
            Action::RedoFiles => DispatchResult::changed(self.state.files.redo()),
            Action::SetColorScheme(scheme) => {
                let changed = self.state.color_scheme != scheme;
                self.state.color_scheme = scheme;
                DispatchResult::changed(changed)
            }
            Action::SetLocale(locale) => {
                let changed = self.state.locale != locale;
                self.state.locale = locale;
                DispatchResult::changed(changed)
            }
            Action::OpenSlot(slot) => {
                // Panel slots (empty name) are not project files.
                let state_changed = if slot.name().is_empty() {
                    false
                } else {
                    let name = slot.encode().into();
                    self.state.files.record_with(|files| files.insert(name))
                };
                debug!(slot = %slot, state_changed, "open slot");
                DispatchResult {
                    effects: vec![Effect::OpenTab(slot)],
                    state_changed,
                }
            }
            Action::CloseSlot(slot) => DispatchResult {
                effects: vec![Effect::CloseTab(slot)],
                state_changed: false,
            },
            Action::Tick => DispatchResult::unchanged(),
        }
    }

    fn reduce_files(&mut self, action: FilesAction) -> DispatchResult {
        let state_changed = match action {
            FilesAction::Add { name } => self
                .state
                .files
                .record_with(|files| files.insert(name)),
            FilesAction::Remove { name } => self
                .state
                .files
                .record_with(|files| files.remove(&name)),
            FilesAction::Rename { from, to } => self
                .state
                .files
                .record_with(|files| files.rename(&from, to)),
        };
        DispatchResult::changed(state_changed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
