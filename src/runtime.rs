use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyModifiers};

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum UiEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.), so the app loop can
/// run headless in tests.
pub trait EventSource {
    /// Wait up to `timeout` for the next event. `None` means the timeout
    /// expired with nothing to process.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>>;
}

/// Production event source polling the terminal via crossterm.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<UiEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            CtEvent::Key(key) => Ok(Some(UiEvent::Key(key))),
            CtEvent::Resize(_, _) => Ok(Some(UiEvent::Resize)),
            _ => Ok(None),
        }
    }
}

/// Queue-backed event source for headless tests.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<UiEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Queue one key event per character.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.push_key(KeyCode::Char(c));
        }
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.queue
            .push_back(UiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<UiEvent>> {
        Ok(self.queue.pop_front())
    }
}
