use anyhow::{Context, Result};
use crossterm::event::{KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::keyboard::history::KeyHighlightTracker;
use crate::keyboard::model::KeyboardModel;
use crate::session::input::{self, Command, RaceInput};
use crate::session::policy::RaceMode;
use crate::session::race::TypingSession;
use crate::session::result::RaceResult;
use crate::session::wrap::MIN_LINE_WIDTH;
use crate::text::{TextCategory, TextLibrary};
use crate::ui::theme::Theme;

/// Columns taken by the typing area's border and padding, plus the column a
/// display line's end marker or break space may use past the wrap width.
const TYPING_AREA_CHROME: usize = 5;

pub struct App {
    pub config: Config,
    pub session: TypingSession,
    pub keyboard_model: KeyboardModel,
    pub key_history: KeyHighlightTracker,
    pub theme: Theme,
    pub category: TextCategory,
    pub mode: RaceMode,
    pub last_result: Option<RaceResult>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    practice_text: Option<Vec<String>>,
    library: TextLibrary,
    rng: SmallRng,
}

impl App {
    /// Builds the first race. `practice_text` replaces the bundled texts until a
    /// category is picked explicitly.
    pub fn new(config: Config, practice_text: Option<Vec<String>>) -> Result<Self> {
        Self::with_rng(config, practice_text, SmallRng::from_entropy())
    }

    pub fn with_rng(
        config: Config,
        practice_text: Option<Vec<String>>,
        mut rng: SmallRng,
    ) -> Result<Self> {
        let library = TextLibrary::new(config.word_count);
        let category = config.text_category;
        let mode = supported_mode(config.race_mode, category);

        let raw = match &practice_text {
            Some(lines) => lines.clone(),
            None => library
                .load(category, &mut rng)
                .with_context(|| format!("loading {} text", category.label()))?,
        };
        let session = TypingSession::new(raw, config.session_options(category, mode))
            .context("preparing the race text")?;

        Ok(Self {
            keyboard_model: KeyboardModel::from_name(&config.keyboard_layout),
            key_history: KeyHighlightTracker::new(config.history_capacity),
            theme: Theme::default(),
            category,
            mode,
            last_result: None,
            status_message: None,
            should_quit: false,
            practice_text,
            library,
            rng,
            session,
            config,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let input = input::classify(&key);
        if matches!(
            input,
            RaceInput::Type(_) | RaceInput::DeleteChar | RaceInput::DeleteWord
        ) {
            let shift = key.modifiers.contains(KeyModifiers::SHIFT);
            self.key_history
                .register_press(&self.keyboard_model, key.code, shift);
        }

        match input {
            RaceInput::Type(ch) => {
                self.session.add_char(ch);
                self.capture_result();
            }
            RaceInput::DeleteChar => {
                self.session.remove_char();
            }
            RaceInput::DeleteWord => {
                self.session.remove_word();
            }
            RaceInput::Command(command) => self.run_command(command),
            RaceInput::Ignore => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::NewText => self.new_text(),
            Command::NextMode => {
                self.mode = self.mode.next_for(self.category);
                self.session.set_mode(self.mode);
                self.status_message = None;
                info!(mode = self.mode.label(), "race mode changed");
            }
            Command::SelectCategory(category) => {
                self.practice_text = None;
                self.category = category;
                self.mode = supported_mode(self.mode, category);
                self.new_text();
            }
        }
    }

    /// Loads fresh text for the current category. A text that cannot be loaded
    /// or wrapped leaves the running race in place and reports why.
    pub fn new_text(&mut self) {
        let raw = match &self.practice_text {
            Some(lines) => Ok(lines.clone()),
            None => self.library.load(self.category, &mut self.rng),
        };
        let outcome = raw
            .map_err(anyhow::Error::from)
            .and_then(|raw| {
                self.session
                    .update_text(raw, self.category, self.mode)
                    .map_err(anyhow::Error::from)
            });
        match outcome {
            Ok(()) => {
                self.key_history.clear();
                self.status_message = None;
            }
            Err(err) => {
                warn!(error = %err, category = self.category.label(), "could not load new text");
                self.status_message = Some(format!("Could not load text: {err}"));
            }
        }
    }

    /// Re-wraps for a terminal `columns` wide, capped at the configured width.
    pub fn resize(&mut self, columns: u16) {
        let width = usize::from(columns)
            .saturating_sub(TYPING_AREA_CHROME)
            .clamp(MIN_LINE_WIDTH, self.config.max_line_width);
        if width == self.session.max_width() {
            return;
        }
        match self.session.resize(width) {
            Ok(()) => self.status_message = None,
            Err(err) => {
                warn!(error = %err, width, "keeping previous wrap");
                self.status_message = Some(format!("Window too narrow: {err}"));
            }
        }
    }

    fn capture_result(&mut self) {
        if let Some(result) = self.session.result() {
            self.last_result = Some(result.clone());
        }
    }
}

fn supported_mode(mode: RaceMode, category: TextCategory) -> RaceMode {
    let available = RaceMode::available_for(category);
    if available.contains(&mode) {
        mode
    } else {
        warn!(
            mode = mode.label(),
            category = category.label(),
            "race mode not offered for category, using completion"
        );
        available[0]
    }
}
