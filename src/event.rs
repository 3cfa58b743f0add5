use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Blocking terminal event source. Every event is handled to completion
/// before the next one is read, so there is no background thread and no tick.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            match event::read()? {
                // Only presses: release/repeat would double-fire actions
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(AppEvent::Key(key)),
                Event::Resize(_, _) => return Ok(AppEvent::Resize),
                _ => {}
            }
        }
    }
}
