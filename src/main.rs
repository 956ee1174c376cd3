use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use dockbench::app::{default_layout, Workbench};
use dockbench::core::InputEvent;
use dockbench::logging;
use dockbench::services::document::{DocumentStore, MemoryDocumentStore};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let _logging = logging::init();

    // Optional argument: path to the JSON document file to load and persist.
    let documents_path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);
    let documents = match &documents_path {
        Some(path) => MemoryDocumentStore::load_json(path)?,
        None => MemoryDocumentStore::new(),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        cursor::SetCursorStyle::BlinkingBar
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, documents.clone());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        cursor::SetCursorStyle::DefaultUserShape
    )?;

    if let Some(path) = &documents_path {
        documents.save_json(path)?;
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    documents: MemoryDocumentStore,
) -> io::Result<()> {
    let documents: Rc<dyn DocumentStore> = Rc::new(documents);
    let mut workbench = Workbench::new(documents, &default_layout());

    while !workbench.should_quit() {
        terminal.draw(|frame| workbench.render(frame))?;
        if crossterm::event::poll(POLL_INTERVAL)? {
            if let Some(event) = InputEvent::from_crossterm(crossterm::event::read()?) {
                workbench.handle_input(&event);
            }
        }
    }
    Ok(())
}
