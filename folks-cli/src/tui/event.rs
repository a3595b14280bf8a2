use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Nothing happened within one tick
    Tick,
}

/// Polls the terminal with a fixed tick so background results get drawn
/// even when no key is pressed
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait at most one tick for the next event
    pub fn next(&self) -> color_eyre::Result<AppEvent> {
        if !event::poll(self.tick_rate)? {
            return Ok(AppEvent::Tick);
        }
        Ok(match event::read()? {
            // Windows also reports releases
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            CrosstermEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => AppEvent::Tick,
        })
    }
}
