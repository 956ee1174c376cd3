//! Workbench: the workspace tab host.
//!
//! Resolves slot identifiers into tabs through the provider registry, owns
//! every open slot for its lifetime, and routes input between global
//! shortcuts, the kernel store, and the focused view. Closing a tab
//! propagates a dispose to its view (and through it to the slot's engine)
//! before the slot is removed.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;
use tracing::info;

use crate::core::event::InputEvent;
use crate::core::registry::{Icon, ProviderContext, ProviderDescriptor, ProviderRegistry};
use crate::core::slot::SlotId;
use crate::core::view::{DocumentView, EventResult};
use crate::kernel::{Action, ColorScheme, Effect, ProjectState, Store};
use crate::services::document::DocumentStore;
use crate::views::{PlaceholderView, ScriptView};

use super::layout::LayoutSpec;

const TAB_ROW_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

/// Provider table for the built-in kinds, plus the fixed fallback for
/// everything else.
pub fn default_registry() -> ProviderRegistry {
    fn panel(icon: Icon) -> ProviderDescriptor {
        ProviderDescriptor::new(icon, move |slot, _ctx| {
            Box::new(PlaceholderView::new(slot, icon))
        })
    }

    let mut registry = ProviderRegistry::new(panel(Icon("·")));
    registry.register("tree", panel(Icon("≡")));
    registry.register("files", panel(Icon("▤")));
    registry.register("scene", panel(Icon("▣")));
    registry.register("inspector", panel(Icon("⚙")));
    registry.register(
        "script",
        ProviderDescriptor::new(Icon("{}"), |slot, ctx| {
            Box::new(ScriptView::new(slot.clone(), Rc::clone(&ctx.documents)))
        }),
    );
    registry
}

/// A resolved, currently-displayed slot. `id` is the raw identifier string
/// and is stable across resolutions of the same identifier.
pub struct OpenTab {
    pub id: String,
    pub slot: SlotId,
    pub icon: Icon,
    pub title: String,
    pub view: Box<dyn DocumentView>,
}

pub struct TabGroup {
    pub weight: u16,
    tabs: Vec<OpenTab>,
    active: usize,
}

impl TabGroup {
    pub fn tabs(&self) -> &[OpenTab] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> Option<&OpenTab> {
        self.tabs.get(self.active)
    }
}

pub struct Workbench {
    store: Store,
    documents: Rc<dyn DocumentStore>,
    registry: ProviderRegistry,
    groups: Vec<TabGroup>,
    active_group: usize,
    should_quit: bool,
}

impl Workbench {
    pub fn new(documents: Rc<dyn DocumentStore>, layout: &LayoutSpec) -> Self {
        let mut workbench = Self {
            store: Store::new(ProjectState::new()),
            documents,
            registry: default_registry(),
            groups: Vec::new(),
            active_group: 0,
            should_quit: false,
        };
        for group in &layout.groups {
            let mut tabs: Vec<OpenTab> = Vec::with_capacity(group.tabs.len());
            for raw in &group.tabs {
                // One engine per key: a slot listed twice keeps its first tab.
                if workbench.find_tab(raw).is_some() || tabs.iter().any(|tab| &tab.id == raw) {
                    continue;
                }
                let tab = workbench.resolve_tab(raw);
                // Register document slots in the project file list.
                workbench
                    .store
                    .dispatch(Action::OpenSlot(tab.slot.clone()));
                tabs.push(tab);
            }
            workbench.groups.push(TabGroup {
                weight: group.weight,
                tabs,
                active: 0,
            });
        }
        workbench
    }

    /// Decodes the identifier, resolves the provider, and binds a fresh
    /// view. The view's engine mounts lazily, on first display.
    pub fn resolve_tab(&self, raw: &str) -> OpenTab {
        let slot = SlotId::decode(raw);
        let descriptor = self.registry.resolve(slot.kind());
        let ctx = ProviderContext {
            documents: Rc::clone(&self.documents),
        };
        let view = (descriptor.render)(&slot, &ctx);
        OpenTab {
            id: raw.to_string(),
            title: slot.label(),
            icon: descriptor.icon,
            slot,
            view,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn active_group(&self) -> usize {
        self.active_group
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn documents(&self) -> &Rc<dyn DocumentStore> {
        &self.documents
    }

    fn active_tab_mut(&mut self) -> Option<&mut OpenTab> {
        let group = self.groups.get_mut(self.active_group)?;
        group.tabs.get_mut(group.active)
    }

    fn find_tab(&self, id: &str) -> Option<(usize, usize)> {
        for (g, group) in self.groups.iter().enumerate() {
            for (t, tab) in group.tabs.iter().enumerate() {
                if tab.id == id {
                    return Some((g, t));
                }
            }
        }
        None
    }

    /// Opens a slot by identifier: focuses the existing tab when one is
    /// already open (no second engine for the same key), otherwise goes
    /// through the kernel so the file list and the tab stay in step.
    pub fn open_slot(&mut self, raw: &str) {
        if let Some((g, t)) = self.find_tab(raw) {
            self.activate(g, t);
            return;
        }
        let slot = SlotId::decode(raw);
        let result = self.store.dispatch(Action::OpenSlot(slot));
        self.apply_effects(result.effects);
    }

    pub fn close_active_tab(&mut self) {
        let Some(slot) = self
            .groups
            .get(self.active_group)
            .and_then(|group| group.active_tab())
            .map(|tab| tab.slot.clone())
        else {
            return;
        };
        let result = self.store.dispatch(Action::CloseSlot(slot));
        self.apply_effects(result.effects);
    }

    pub fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        self.apply_effects(result.effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenTab(slot) => {
                    let tab = self.resolve_tab(&slot.encode());
                    if self.groups.is_empty() {
                        self.groups.push(TabGroup {
                            weight: 1,
                            tabs: Vec::new(),
                            active: 0,
                        });
                        self.active_group = 0;
                    }
                    let group = &mut self.groups[self.active_group];
                    group.tabs.push(tab);
                    let index = group.tabs.len() - 1;
                    self.activate(self.active_group, index);
                }
                Effect::CloseTab(slot) => {
                    let id = slot.encode();
                    if let Some((g, t)) = self.find_tab(&id) {
                        let mut tab = self.groups[g].tabs.remove(t);
                        tab.view.on_close();
                        info!(slot = %tab.slot, "tab closed");
                        let group = &mut self.groups[g];
                        if group.active >= group.tabs.len() && group.active > 0 {
                            group.active = group.tabs.len() - 1;
                        }
                    }
                }
            }
        }
    }

    fn activate(&mut self, group: usize, tab: usize) {
        if group >= self.groups.len() || tab >= self.groups[group].tabs.len() {
            return;
        }
        let previous_group = self.active_group;
        let previous_tab = self.groups[previous_group].active;
        if let Some(old) = self.groups[previous_group].tabs.get_mut(previous_tab) {
            old.view.on_blur();
        }
        self.active_group = group;
        self.groups[group].active = tab;
        self.groups[group].tabs[tab].view.on_focus();
    }

    fn cycle_tab(&mut self, delta: isize) {
        let Some(group) = self.groups.get(self.active_group) else {
            return;
        };
        if group.tabs.is_empty() {
            return;
        }
        let len = group.tabs.len() as isize;
        let next = (group.active as isize + delta).rem_euclid(len) as usize;
        self.activate(self.active_group, next);
    }

    fn cycle_group(&mut self) {
        if self.groups.is_empty() {
            return;
        }
        let next = (self.active_group + 1) % self.groups.len();
        let tab = self.groups[next].active.min(self.groups[next].tabs.len().saturating_sub(1));
        self.activate(next, tab);
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> EventResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                EventResult::Consumed
            }
            KeyCode::Char('w') if ctrl => {
                self.close_active_tab();
                EventResult::Consumed
            }
            KeyCode::Right if alt => {
                self.cycle_tab(1);
                EventResult::Consumed
            }
            KeyCode::Left if alt => {
                self.cycle_tab(-1);
                EventResult::Consumed
            }
            KeyCode::F(6) => {
                self.cycle_group();
                EventResult::Consumed
            }
            KeyCode::F(2) => {
                let scheme = self.store.state().color_scheme.toggled();
                self.dispatch(Action::SetColorScheme(scheme));
                EventResult::Consumed
            }
            KeyCode::F(3) => {
                let locale = self.store.state().locale.toggled();
                self.dispatch(Action::SetLocale(locale));
                EventResult::Consumed
            }
            KeyCode::Char('z') if alt => {
                self.dispatch(Action::UndoFiles);
                EventResult::Consumed
            }
            KeyCode::Char('y') if alt => {
                self.dispatch(Action::RedoFiles);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if self.handle_global_key(key).is_consumed() {
                    return;
                }
                if let Some(tab) = self.active_tab_mut() {
                    tab.view.handle_input(event);
                }
            }
            InputEvent::Paste(_) => {
                if let Some(tab) = self.active_tab_mut() {
                    tab.view.handle_input(event);
                }
            }
            InputEvent::FocusLost => {
                if let Some(tab) = self.active_tab_mut() {
                    tab.view.on_blur();
                }
            }
            InputEvent::FocusGained => {
                if let Some(tab) = self.active_tab_mut() {
                    tab.view.on_focus();
                }
            }
            InputEvent::Resize(_, _) => {}
        }
    }

    fn palette(&self) -> (Style, Style, Style) {
        match self.store.state().color_scheme {
            ColorScheme::Dark => (
                Style::default().fg(Color::Gray),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::DarkGray),
            ),
            ColorScheme::Light => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Gray),
            ),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let (base, highlight, dim) = self.palette();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(STATUS_HEIGHT), Constraint::Min(0)])
            .split(frame.area());

        let state = self.store.state();
        let active_id = self
            .groups
            .get(self.active_group)
            .and_then(|group| group.active_tab())
            .map(|tab| tab.id.clone())
            .unwrap_or_default();
        let status = Line::from(vec![
            Span::styled(" dockbench ", highlight),
            Span::styled(active_id, base),
            Span::styled(
                format!(
                    "  [{} | {}]",
                    match state.color_scheme {
                        ColorScheme::Dark => "dark",
                        ColorScheme::Light => "light",
                    },
                    state.locale.tag()
                ),
                dim,
            ),
        ]);
        frame.render_widget(Paragraph::new(status), rows[0]);

        let constraints: Vec<Constraint> = self
            .groups
            .iter()
            .map(|group| Constraint::Fill(group.weight))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[1]);

        let active_group = self.active_group;
        for (index, group) in self.groups.iter_mut().enumerate() {
            let area = columns[index];
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(TAB_ROW_HEIGHT), Constraint::Min(0)])
                .split(area);
            render_tab_row(frame, parts[0], group, index == active_group, base, highlight, dim);
            if let Some(tab) = group.tabs.get_mut(group.active) {
                tab.view.render(frame, parts[1]);
            }
        }
    }
}

fn render_tab_row(
    frame: &mut Frame,
    area: Rect,
    group: &TabGroup,
    group_active: bool,
    base: Style,
    highlight: Style,
    dim: Style,
) {
    if group.tabs.is_empty() {
        return;
    }
    let titles: Vec<Line> = group
        .tabs
        .iter()
        .map(|tab| Line::from(format!("{} {}", tab.icon.0, tab.title)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(group.active)
        .style(if group_active { base } else { dim })
        .highlight_style(if group_active { highlight } else { base });
    frame.render_widget(tabs, area);
}

#[cfg(test)]
#[path = "../../tests/unit/app/workbench.rs"]
mod tests;
