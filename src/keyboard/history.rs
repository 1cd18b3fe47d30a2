use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::KeyCode;

use crate::keyboard::model::KeyboardModel;

/// One remembered key press, identified by the physical key's base char.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub shift: bool,
    pub at: Instant,
}

/// Bounded most-recent-first history of key presses, used to fade highlights
/// on the keyboard diagram. Rank 0 is the newest press.
#[derive(Clone, Debug)]
pub struct KeyHighlightTracker {
    presses: VecDeque<KeyPress>,
    capacity: usize,
}

impl KeyHighlightTracker {
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            presses: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a press of `code`. Keys that are not on the keyboard leave the
    /// history alone and return `false`. A shifted character (`!`, `A`) counts
    /// as a shifted press even if the terminal did not report the modifier.
    pub fn register_press(&mut self, model: &KeyboardModel, code: KeyCode, shift: bool) -> bool {
        self.register_press_at(model, code, shift, Instant::now())
    }

    pub fn register_press_at(
        &mut self,
        model: &KeyboardModel,
        code: KeyCode,
        shift: bool,
        at: Instant,
    ) -> bool {
        let Some(key) = model.key_for(code) else {
            return false;
        };
        let shift = shift || matches!(code, KeyCode::Char(ch) if ch != key.base);
        if self.presses.len() == self.capacity {
            self.presses.pop_back();
        }
        self.presses.push_front(KeyPress {
            key: key.base,
            shift,
            at,
        });
        true
    }

    /// Presses with their rank, newest first.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &KeyPress)> {
        self.presses.iter().enumerate()
    }

    /// Rank of the newest press of `key`, if it is still remembered.
    pub fn rank_of(&self, key: char) -> Option<usize> {
        self.presses.iter().position(|p| p.key == key)
    }

    pub fn len(&self) -> usize {
        self.presses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

impl Default for KeyHighlightTracker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
