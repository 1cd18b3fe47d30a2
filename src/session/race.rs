use std::ops::Range;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::error::SessionError;
use crate::session::policy::{FinishReason, Progress, RaceMode, RaceRules, TerminationPolicy};
use crate::session::result::{self, RaceResult};
use crate::session::wrap::{self, WrappedText};
use crate::text::{NEWLINE_SENTINEL, TextCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Finished,
}

/// Position of the next character to type. Points one line past the end of the
/// layout once everything is typed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Untyped,
    Correct,
    Incorrect,
}

/// Render change produced by a keystroke: the cell at `at` now shows `status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharUpdate {
    pub at: Cursor,
    pub index: usize,
    pub status: CharStatus,
}

#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub category: TextCategory,
    pub mode: RaceMode,
    pub max_width: usize,
    pub rules: RaceRules,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            category: TextCategory::Quotes,
            mode: RaceMode::Completion,
            max_width: 80,
            rules: RaceRules::default(),
        }
    }
}

/// One typing race over a block of text.
#[derive(Clone, Debug)]
pub struct TypingSession {
    raw: Vec<String>,
    category: TextCategory,
    mode: RaceMode,
    rules: RaceRules,
    policy: TerminationPolicy,
    max_width: usize,
    lines: Vec<Vec<char>>,
    line_starts: Vec<usize>,
    total_chars: usize,
    first_word: String,
    typed: Vec<char>,
    errors: Vec<usize>,
    errors_made: usize,
    cursor: Cursor,
    status: SessionStatus,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    result: Option<RaceResult>,
}

impl TypingSession {
    pub fn new(raw: Vec<String>, options: SessionOptions) -> Result<Self, SessionError> {
        let wrapped = wrap::wrap(&raw, options.max_width, options.category.sentinel())?;
        let mut session = Self {
            raw: Vec::new(),
            category: options.category,
            mode: options.mode,
            rules: options.rules,
            policy: TerminationPolicy::for_mode(options.mode, &options.rules),
            max_width: options.max_width,
            lines: Vec::new(),
            line_starts: Vec::new(),
            total_chars: 0,
            first_word: String::new(),
            typed: Vec::new(),
            errors: Vec::new(),
            errors_made: 0,
            cursor: Cursor::default(),
            status: SessionStatus::NotStarted,
            started_at: None,
            finished_at: None,
            result: None,
        };
        session.load(raw, wrapped);
        Ok(session)
    }

    /// Swap in new text and race mode. Everything typed so far is discarded.
    /// On error the current session is left untouched.
    pub fn update_text(
        &mut self,
        raw: Vec<String>,
        category: TextCategory,
        mode: RaceMode,
    ) -> Result<(), SessionError> {
        let wrapped = wrap::wrap(&raw, self.max_width, category.sentinel())?;
        self.category = category;
        self.set_policy(mode);
        self.load(raw, wrapped);
        Ok(())
    }

    /// Restart the same text under another race mode.
    pub fn set_mode(&mut self, mode: RaceMode) {
        self.set_policy(mode);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.typed.clear();
        self.errors.clear();
        self.errors_made = 0;
        self.cursor = Cursor::default();
        self.status = SessionStatus::NotStarted;
        self.started_at = None;
        self.finished_at = None;
        self.result = None;
    }

    /// Re-wrap for a new width, keeping what has been typed. The flattened target
    /// text is the same at every width, so only the cursor has to move.
    pub fn resize(&mut self, max_width: usize) -> Result<(), SessionError> {
        let wrapped = wrap::wrap(&self.raw, max_width, self.category.sentinel())?;
        debug!(from = self.max_width, to = max_width, "re-wrapping race text");
        self.max_width = max_width;
        self.set_layout(wrapped);
        self.cursor = self.locate(self.typed.len());
        Ok(())
    }

    fn set_policy(&mut self, mode: RaceMode) {
        self.mode = mode;
        self.policy = TerminationPolicy::for_mode(mode, &self.rules);
    }

    fn load(&mut self, raw: Vec<String>, wrapped: WrappedText) {
        self.first_word = raw
            .iter()
            .flat_map(|l| l.split_whitespace())
            .next()
            .unwrap_or_default()
            .to_string();
        self.raw = raw;
        self.set_layout(wrapped);
        self.reset();
    }

    fn set_layout(&mut self, wrapped: WrappedText) {
        self.lines = wrapped.lines.iter().map(|l| l.chars().collect()).collect();
        self.line_starts = self
            .lines
            .iter()
            .scan(0, |start, line| {
                let this = *start;
                *start += line.len();
                Some(this)
            })
            .collect();
        self.total_chars = wrapped.total_chars;
    }

    pub fn add_char(&mut self, ch: char) -> Vec<CharUpdate> {
        self.add_char_at(ch, Instant::now())
    }

    /// Type `ch` at time `now`. A tab is typed as `tab_width` spaces, so a
    /// mistyped tab can count several errors.
    pub fn add_char_at(&mut self, ch: char, now: Instant) -> Vec<CharUpdate> {
        if ch == '\t' {
            (0..self.rules.tab_width)
                .map_while(|_| self.add_one(' ', now))
                .collect()
        } else {
            self.add_one(ch, now).into_iter().collect()
        }
    }

    fn add_one(&mut self, ch: char, now: Instant) -> Option<CharUpdate> {
        if self.status == SessionStatus::Finished {
            return None;
        }
        let at = self.cursor;
        let target = *self.lines.get(at.line)?.get(at.column)?;

        if self.status == SessionStatus::NotStarted {
            self.status = SessionStatus::InProgress;
            self.started_at = Some(now);
            debug!(mode = ?self.mode, total_chars = self.total_chars, "race started");
        }

        let index = self.typed.len();
        self.typed.push(ch);
        let status = if matches_target(ch, target) {
            CharStatus::Correct
        } else {
            self.errors.push(index);
            self.errors_made += 1;
            CharStatus::Incorrect
        };
        self.advance();

        let progress = Progress {
            typed: self.typed.len(),
            total: self.total_chars,
            errors_made: self.errors_made,
            elapsed: self.elapsed_at(now),
        };
        if let Some(reason) = self.policy.evaluate(&progress) {
            self.finish(reason, now);
        }

        Some(CharUpdate { at, index, status })
    }

    /// Delete the last typed character. Refused when nothing is typed, when the
    /// race is over, or when there are no mistakes and the last character is a
    /// space: a correctly finished word cannot be backspaced into.
    pub fn remove_char(&mut self) -> Option<CharUpdate> {
        if self.status == SessionStatus::Finished {
            return None;
        }
        let &last = self.typed.last()?;
        if self.errors.is_empty() && last == ' ' {
            trace!("refusing to delete past a completed word");
            return None;
        }

        self.typed.pop();
        let index = self.typed.len();
        if self.errors.last() == Some(&index) {
            self.errors.pop();
        }
        self.retreat();

        Some(CharUpdate {
            at: self.cursor,
            index,
            status: CharStatus::Untyped,
        })
    }

    /// Delete back to the previous space. If the cursor sits after a space, only
    /// mistyped trailing spaces are removed.
    pub fn remove_word(&mut self) -> Vec<CharUpdate> {
        let mut updates = Vec::new();
        let Some(&last) = self.typed.last() else {
            return updates;
        };

        if last == ' ' {
            while self.typed.last() == Some(&' ')
                && self.errors.last() == Some(&(self.typed.len() - 1))
            {
                match self.remove_char() {
                    Some(update) => updates.push(update),
                    None => break,
                }
            }
        } else {
            while self.typed.last().is_some_and(|&c| c != ' ') {
                match self.remove_char() {
                    Some(update) => updates.push(update),
                    None => break,
                }
            }
        }
        updates
    }

    fn advance(&mut self) {
        self.cursor.column += 1;
        let line_len = self.lines.get(self.cursor.line).map_or(0, Vec::len);
        if self.cursor.column >= line_len {
            self.cursor.column = 0;
            self.cursor.line += 1;
        }
    }

    fn retreat(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.lines[self.cursor.line].len().saturating_sub(1);
        }
    }

    fn finish(&mut self, reason: FinishReason, now: Instant) {
        self.status = SessionStatus::Finished;
        self.finished_at = Some(now);
        let result = RaceResult::from_race(self, reason);
        info!(
            reason = ?reason,
            wpm = result.wpm,
            accuracy = result.accuracy,
            errors = result.errors_made,
            "race finished"
        );
        self.result = Some(result);
    }

    fn locate(&self, index: usize) -> Cursor {
        for (line, (&start, chars)) in self.line_starts.iter().zip(&self.lines).enumerate() {
            if index < start + chars.len() {
                return Cursor {
                    line,
                    column: index - start,
                };
            }
        }
        Cursor {
            line: self.lines.len(),
            column: 0,
        }
    }

    /// Status of the character at `column` on display line `line`.
    pub fn char_status(&self, line: usize, column: usize) -> CharStatus {
        let Some(&start) = self.line_starts.get(line) else {
            return CharStatus::Untyped;
        };
        let index = start + column;
        if index >= self.typed.len() {
            CharStatus::Untyped
        } else if self.errors.binary_search(&index).is_ok() {
            CharStatus::Incorrect
        } else {
            CharStatus::Correct
        }
    }

    /// Target characters of a display line paired with how they were typed.
    pub fn line_statuses(&self, line: usize) -> Vec<(char, CharStatus)> {
        self.lines.get(line).map_or_else(Vec::new, |chars| {
            chars
                .iter()
                .enumerate()
                .map(|(column, &ch)| (ch, self.char_status(line, column)))
                .collect()
        })
    }

    /// Page of display lines that contains the cursor.
    pub fn visible_range(&self, lines_shown: usize) -> Range<usize> {
        let count = self.lines.len();
        if lines_shown == 0 || count == 0 {
            return 0..count;
        }
        let start = self.cursor.line.min(count - 1) / lines_shown * lines_shown;
        start..(start + lines_shown).min(count)
    }

    pub fn display_lines(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.iter().collect()).collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    /// Indices into the typed buffer that are currently wrong, ascending.
    pub fn errors(&self) -> &[usize] {
        &self.errors
    }

    /// Every mistyped keystroke so far, including ones since corrected.
    pub fn errors_made(&self) -> usize {
        self.errors_made
    }

    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    pub fn first_word(&self) -> &str {
        &self.first_word
    }

    pub fn mode(&self) -> RaceMode {
        self.mode
    }

    pub fn category(&self) -> TextCategory {
        self.category
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn result(&self) -> Option<&RaceResult> {
        self.result.as_ref()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    pub fn running_accuracy(&self) -> Option<f64> {
        result::accuracy(self.errors_made, self.typed.len())
    }

    pub fn live_wpm(&self) -> u32 {
        result::wpm(&self.typed, &self.first_word, self.elapsed())
    }
}

/// The newline marker at the end of a code line also accepts Enter, whichever
/// character the terminal sends for it.
fn matches_target(typed: char, target: char) -> bool {
    typed == target || (target == NEWLINE_SENTINEL && matches!(typed, '\r' | '\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(lines: &[&str], options: SessionOptions) -> TypingSession {
        let raw = lines.iter().map(|l| l.to_string()).collect();
        TypingSession::new(raw, options).unwrap()
    }

    fn prose(lines: &[&str], width: usize) -> TypingSession {
        session(
            lines,
            SessionOptions {
                max_width: width,
                ..SessionOptions::default()
            },
        )
    }

    fn type_str(s: &mut TypingSession, text: &str) {
        for ch in text.chars() {
            s.add_char(ch);
        }
    }

    #[test]
    fn test_new_session_is_not_started() {
        let s = prose(&["hello world"], 20);
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert_eq!(s.cursor(), Cursor::default());
        assert_eq!(s.total_chars(), 11);
        assert_eq!(s.elapsed(), Duration::ZERO);
        assert!(s.result().is_none());
    }

    #[test]
    fn test_construction_errors_propagate() {
        let raw = vec!["abcdefghij".to_string()];
        let err = TypingSession::new(
            raw,
            SessionOptions {
                max_width: 4,
                ..SessionOptions::default()
            },
        )
        .err();
        assert_eq!(err, Some(SessionError::UnbreakableLine { line: 1, width: 4 }));
    }

    #[test]
    fn test_first_char_starts_race() {
        let mut s = prose(&["abc"], 10);
        let updates = s.add_char('a');
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(
            updates,
            vec![CharUpdate {
                at: Cursor { line: 0, column: 0 },
                index: 0,
                status: CharStatus::Correct,
            }]
        );
    }

    #[test]
    fn test_cursor_wraps_to_next_line() {
        let mut s = prose(&["ab", "cd"], 10);
        type_str(&mut s, "ab");
        assert_eq!(s.cursor(), Cursor { line: 0, column: 2 });
        s.add_char(' ');
        assert_eq!(s.cursor(), Cursor { line: 1, column: 0 });
        assert!(s.remove_char().is_none(), "completed word is protected");
    }

    #[test]
    fn test_backspace_across_line_break_after_error() {
        let mut s = prose(&["ab", "cd"], 10);
        type_str(&mut s, "xb ");
        assert_eq!(s.cursor(), Cursor { line: 1, column: 0 });
        let update = s.remove_char().unwrap();
        assert_eq!(update.at, Cursor { line: 0, column: 2 });
        assert_eq!(update.status, CharStatus::Untyped);
        assert_eq!(s.cursor(), Cursor { line: 0, column: 2 });
    }

    #[test]
    fn test_enter_matches_newline_sentinel() {
        let mut s = session(
            &["if x:", "    pass"],
            SessionOptions {
                category: TextCategory::Python,
                max_width: 20,
                ..SessionOptions::default()
            },
        );
        type_str(&mut s, "if x:\r");
        assert!(s.errors().is_empty());
        assert_eq!(s.cursor(), Cursor { line: 1, column: 0 });
    }

    #[test]
    fn test_space_does_not_match_newline_sentinel() {
        let mut s = session(
            &["a", "b"],
            SessionOptions {
                category: TextCategory::Rust,
                max_width: 20,
                ..SessionOptions::default()
            },
        );
        type_str(&mut s, "a ");
        assert_eq!(s.errors(), &[1]);
    }

    #[test]
    fn test_tab_types_spaces() {
        let mut s = session(
            &["x", "    y"],
            SessionOptions {
                category: TextCategory::Python,
                max_width: 20,
                ..SessionOptions::default()
            },
        );
        type_str(&mut s, "x\n");
        let updates = s.add_char('\t');
        assert_eq!(updates.len(), 4);
        assert!(s.errors().is_empty());
        assert_eq!(s.cursor(), Cursor { line: 1, column: 4 });
    }

    #[test]
    fn test_mistyped_tab_counts_an_error_per_space() {
        let mut s = prose(&["abcdefgh"], 20);
        s.add_char('\t');
        assert_eq!(s.errors(), &[0, 1, 2, 3]);
        assert_eq!(s.errors_made(), 4);
    }

    #[test]
    fn test_tab_width_is_configurable() {
        let mut s = session(
            &["  ab"],
            SessionOptions {
                max_width: 20,
                rules: RaceRules {
                    tab_width: 2,
                    ..RaceRules::default()
                },
                ..SessionOptions::default()
            },
        );
        s.add_char('\t');
        assert_eq!(s.typed(), &[' ', ' ']);
        assert!(s.errors().is_empty());
    }

    #[test]
    fn test_tab_stops_at_end_of_text() {
        let mut s = prose(&["ab"], 20);
        let updates = s.add_char('\t');
        assert_eq!(updates.len(), 2);
        assert!(s.is_finished());
        assert_eq!(s.typed().len(), 2);
    }

    #[test]
    fn test_add_after_finish_is_ignored() {
        let mut s = prose(&["ab"], 10);
        type_str(&mut s, "ab");
        assert!(s.is_finished());
        assert!(s.add_char('c').is_empty());
        assert!(s.remove_char().is_none());
        assert_eq!(s.typed(), &['a', 'b']);
        assert_eq!(s.cursor(), Cursor { line: 1, column: 0 });
    }

    #[test]
    fn test_remove_from_empty_buffer() {
        let mut s = prose(&["ab"], 10);
        assert!(s.remove_char().is_none());
        assert!(s.remove_word().is_empty());
        assert_eq!(s.status(), SessionStatus::NotStarted);
    }

    #[test]
    fn test_corrected_error_still_counts() {
        let mut s = prose(&["abc"], 10);
        type_str(&mut s, "x");
        s.remove_char();
        type_str(&mut s, "abc");
        assert!(s.errors().is_empty());
        assert_eq!(s.errors_made(), 1);
        let result = s.result().unwrap();
        assert_eq!(result.errors_made, 1);
    }

    #[test]
    fn test_remove_word_deletes_partial_word() {
        let mut s = prose(&["ab cd ef"], 20);
        type_str(&mut s, "ab cd");
        let updates = s.remove_word();
        assert_eq!(updates.len(), 2);
        assert_eq!(s.typed(), &['a', 'b', ' ']);
        assert_eq!(s.cursor(), Cursor { line: 0, column: 3 });
    }

    #[test]
    fn test_remove_word_stops_at_space() {
        let mut s = prose(&["ab cd ef"], 20);
        type_str(&mut s, "ab xd");
        s.remove_word();
        assert_eq!(s.typed(), &['a', 'b', ' ']);
        assert!(s.errors().is_empty());
    }

    #[test]
    fn test_remove_word_clears_mistyped_spaces() {
        let mut s = prose(&["abcd ef"], 20);
        type_str(&mut s, "ab  ");
        assert_eq!(s.errors(), &[2, 3]);
        s.remove_word();
        assert_eq!(s.typed(), &['a', 'b']);
        assert!(s.errors().is_empty());
    }

    #[test]
    fn test_remove_word_keeps_correct_space_after_earlier_error() {
        let mut s = prose(&["ab cd"], 20);
        type_str(&mut s, "xb ");
        assert!(s.remove_word().is_empty());
        assert_eq!(s.typed().len(), 3);
    }

    #[test]
    fn test_char_status_for_rendering() {
        let mut s = prose(&["abc"], 10);
        type_str(&mut s, "ax");
        assert_eq!(
            s.line_statuses(0),
            vec![
                ('a', CharStatus::Correct),
                ('b', CharStatus::Incorrect),
                ('c', CharStatus::Untyped),
            ]
        );
        assert_eq!(s.char_status(5, 0), CharStatus::Untyped);
    }

    #[test]
    fn test_time_trial_ends_on_keystroke_after_limit() {
        let mut s = session(
            &["one two three four five six seven"],
            SessionOptions {
                category: TextCategory::Words,
                mode: RaceMode::TimeTrial,
                max_width: 80,
                rules: RaceRules {
                    time_limit: Duration::from_secs(30),
                    ..RaceRules::default()
                },
            },
        );
        let t0 = Instant::now();
        s.add_char_at('o', t0);
        s.add_char_at('n', t0 + Duration::from_secs(29));
        assert_eq!(s.status(), SessionStatus::InProgress);
        s.add_char_at('e', t0 + Duration::from_secs(31));
        assert!(s.is_finished());
        let result = s.result().unwrap();
        assert_eq!(result.reason, FinishReason::TimeExpired);
        assert!((result.elapsed_secs - 31.0).abs() < 1e-6);
        // "one" matches the first word: 1 word in 31s.
        assert_eq!(result.wpm, 2);
    }

    #[test]
    fn test_accuracy_race_stops_after_min_chars() {
        let mut s = session(
            &["abcdefghijklmnopqrstuvwxyz"],
            SessionOptions {
                mode: RaceMode::Accuracy,
                max_width: 80,
                rules: RaceRules {
                    accuracy_threshold: 90.0,
                    accuracy_min_chars: 5,
                    ..RaceRules::default()
                },
                ..SessionOptions::default()
            },
        );
        s.add_char('x');
        assert_eq!(s.status(), SessionStatus::InProgress, "too early to judge");
        type_str(&mut s, "bcd");
        assert_eq!(s.status(), SessionStatus::InProgress);
        s.add_char('e');
        assert!(s.is_finished());
        let result = s.result().unwrap();
        assert_eq!(result.reason, FinishReason::AccuracyDropped);
        assert!(!result.reason.is_success());
        assert_eq!(result.typed_chars, 5);
    }

    #[test]
    fn test_resize_keeps_progress() {
        let mut s = prose(&["the quick brown fox", "jumps over"], 40);
        type_str(&mut s, "the quick br");
        let before = s.typed().to_vec();
        s.resize(10).unwrap();
        assert_eq!(s.display_lines(), vec!["the quick ", "brown fox ", "jumps over"]);
        assert_eq!(s.typed(), before.as_slice());
        assert_eq!(s.cursor(), Cursor { line: 1, column: 2 });
        assert_eq!(s.total_chars(), 30);
        type_str(&mut s, "own fox jumps over");
        assert!(s.is_finished());
    }

    #[test]
    fn test_failed_resize_leaves_layout() {
        let mut s = prose(&["abcdefgh ij"], 20);
        assert!(s.resize(4).is_err());
        assert_eq!(s.max_width(), 20);
        assert_eq!(s.line_count(), 1);
    }

    #[test]
    fn test_update_text_resets_everything() {
        let mut s = prose(&["abc"], 10);
        type_str(&mut s, "ax");
        s.update_text(vec!["xyz".to_string()], TextCategory::Words, RaceMode::TimeTrial)
            .unwrap();
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert!(s.typed().is_empty());
        assert!(s.errors().is_empty());
        assert_eq!(s.errors_made(), 0);
        assert_eq!(s.mode(), RaceMode::TimeTrial);
        assert_eq!(s.first_word(), "xyz");
    }

    #[test]
    fn test_update_text_failure_keeps_session() {
        let mut s = prose(&["abc"], 10);
        type_str(&mut s, "a");
        let err = s.update_text(vec![String::new()], TextCategory::Quotes, RaceMode::Completion);
        assert_eq!(err, Err(SessionError::EmptyText));
        assert_eq!(s.typed(), &['a']);
    }

    #[test]
    fn test_visible_range_pages_with_cursor() {
        let mut s = prose(&["a", "b", "c", "d", "e"], 10);
        assert_eq!(s.visible_range(2), 0..2);
        type_str(&mut s, "a b ");
        assert_eq!(s.cursor().line, 2);
        assert_eq!(s.visible_range(2), 2..4);
        type_str(&mut s, "c d ");
        assert_eq!(s.visible_range(2), 4..5);
        assert_eq!(s.visible_range(0), 0..5);
    }

    #[test]
    fn test_set_mode_restarts() {
        let mut s = prose(&["abc"], 10);
        type_str(&mut s, "ab");
        s.set_mode(RaceMode::Accuracy);
        assert_eq!(s.mode(), RaceMode::Accuracy);
        assert_eq!(s.status(), SessionStatus::NotStarted);
        assert!(s.typed().is_empty());
    }
}
