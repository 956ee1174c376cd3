use crossterm::event::KeyEvent;

/// Host input events, narrowed from the terminal backend.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
}

impl InputEvent {
    /// Mouse events are not routed to views; the docking layer owns them.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(e) => Some(InputEvent::Key(e)),
            crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
            crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            crossterm::event::Event::FocusGained => Some(InputEvent::FocusGained),
            crossterm::event::Event::FocusLost => Some(InputEvent::FocusLost),
            crossterm::event::Event::Mouse(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(e) => Some(e),
            _ => None,
        }
    }
}
