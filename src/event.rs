use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Reads terminal events on the calling thread. A `Tick` is produced when
/// nothing arrives within the tick rate so the clock on screen keeps moving.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            if !event::poll(self.tick_rate)? {
                return Ok(AppEvent::Tick);
            }
            match event::read()? {
                Event::Key(key) => return Ok(AppEvent::Key(key)),
                Event::Resize(w, h) => return Ok(AppEvent::Resize(w, h)),
                _ => {}
            }
        }
    }
}
