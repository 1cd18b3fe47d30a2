use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::policy::{FinishReason, RaceMode};
use crate::session::race::TypingSession;

/// Final numbers for a finished race. Built once when the session ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub errors_made: usize,
    pub wpm: u32,
    pub accuracy: f64,
    pub typed_chars: usize,
    pub total_chars: usize,
    pub elapsed_secs: f64,
    pub mode: RaceMode,
    pub reason: FinishReason,
    pub timestamp: DateTime<Utc>,
}

impl RaceResult {
    pub(crate) fn from_race(race: &TypingSession, reason: FinishReason) -> Self {
        let typed = race.typed();
        let elapsed = race.elapsed();
        Self {
            errors_made: race.errors_made(),
            wpm: wpm(typed, race.first_word(), elapsed),
            accuracy: accuracy(race.errors_made(), typed.len()).unwrap_or(0.0),
            typed_chars: typed.len(),
            total_chars: race.total_chars(),
            elapsed_secs: elapsed.as_secs_f64(),
            mode: race.mode(),
            reason,
            timestamp: Utc::now(),
        }
    }
}

/// Percentage of typed characters that were not mistakes, or `None` before
/// anything is typed. Corrected mistakes still count against it.
pub fn accuracy(errors_made: usize, typed: usize) -> Option<f64> {
    if typed == 0 {
        return None;
    }
    Some(((1.0 - errors_made as f64 / typed as f64) * 100.0).clamp(0.0, 100.0))
}

/// Rough word count of the typed buffer: whitespace-separated tokens, with a
/// partly typed last word counted as a whole one. A lone token only counts if it
/// is exactly the first word of the text.
pub fn word_count(typed: &[char], first_word: &str) -> usize {
    let text: String = typed.iter().collect();
    if !typed.iter().any(|c| c.is_whitespace()) {
        return usize::from(!text.is_empty() && text == first_word);
    }
    text.split_whitespace().count()
}

/// Words per minute using [`word_count`]. Approximate on purpose: it counts
/// words, not five-character groups.
pub fn wpm(typed: &[char], first_word: &str, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    (word_count(typed, first_word) as f64 / minutes).round() as u32
}
