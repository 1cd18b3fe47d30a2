use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::session::policy::{RaceMode, RaceRules};
use crate::session::race::SessionOptions;
use crate::session::wrap::{MAX_LINE_WIDTH, MIN_LINE_WIDTH};
use crate::text::TextCategory;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keyboard_layout")]
    pub keyboard_layout: String,
    #[serde(default)]
    pub race_mode: RaceMode,
    #[serde(default = "default_text_category")]
    pub text_category: TextCategory,
    #[serde(default = "default_max_line_width")]
    pub max_line_width: usize,
    #[serde(default = "default_lines_shown")]
    pub lines_shown: usize,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_accuracy_threshold")]
    pub accuracy_threshold: f64,
    #[serde(default = "default_accuracy_min_chars")]
    pub accuracy_min_chars: usize,
    #[serde(default = "default_time_trial_secs")]
    pub time_trial_secs: u64,
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_keyboard_layout() -> String {
    "qwerty".to_string()
}
fn default_text_category() -> TextCategory {
    TextCategory::Quotes
}
fn default_max_line_width() -> usize {
    80
}
fn default_lines_shown() -> usize {
    6
}
fn default_word_count() -> usize {
    60
}
fn default_accuracy_threshold() -> f64 {
    92.0
}
fn default_accuracy_min_chars() -> usize {
    10
}
fn default_time_trial_secs() -> u64 {
    30
}
fn default_tab_width() -> usize {
    4
}
fn default_history_capacity() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyboard_layout: default_keyboard_layout(),
            race_mode: RaceMode::default(),
            text_category: default_text_category(),
            max_line_width: default_max_line_width(),
            lines_shown: default_lines_shown(),
            word_count: default_word_count(),
            accuracy_threshold: default_accuracy_threshold(),
            accuracy_min_chars: default_accuracy_min_chars(),
            time_trial_secs: default_time_trial_secs(),
            tab_width: default_tab_width(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Reads the config at `path`, or the defaults when no file exists yet.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyrace")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&self.max_line_width) {
            return invalid(
                "max_line_width",
                format!(
                    "{} is outside {MIN_LINE_WIDTH}..={MAX_LINE_WIDTH}",
                    self.max_line_width
                ),
            );
        }
        if self.lines_shown == 0 {
            return invalid("lines_shown", "must show at least one line".to_string());
        }
        if self.word_count == 0 {
            return invalid("word_count", "word races need at least one word".to_string());
        }
        // NaN fails this check as well.
        if !(self.accuracy_threshold > 0.0 && self.accuracy_threshold <= 100.0) {
            return invalid(
                "accuracy_threshold",
                format!("{} is not a percentage in (0, 100]", self.accuracy_threshold),
            );
        }
        if self.time_trial_secs == 0 {
            return invalid("time_trial_secs", "time trials need a duration".to_string());
        }
        if self.tab_width == 0 {
            return invalid("tab_width", "must be at least one space".to_string());
        }
        if self.history_capacity == 0 {
            return invalid("history_capacity", "must remember at least one key".to_string());
        }
        Ok(())
    }

    pub fn race_rules(&self) -> RaceRules {
        RaceRules {
            accuracy_threshold: self.accuracy_threshold,
            accuracy_min_chars: self.accuracy_min_chars,
            time_limit: Duration::from_secs(self.time_trial_secs),
            tab_width: self.tab_width,
        }
    }

    pub fn session_options(&self, category: TextCategory, mode: RaceMode) -> SessionOptions {
        SessionOptions {
            category,
            mode,
            max_width: self.max_line_width,
            rules: self.race_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.race_mode, RaceMode::Completion);
        assert_eq!(config.text_category, TextCategory::Quotes);
        assert_eq!(config.max_line_width, 80);
        assert_eq!(config.history_capacity, 5);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
keyboard_layout = "dvorak"
race_mode = "time_trial"
text_category = "words"
time_trial_secs = 60
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.keyboard_layout, "dvorak");
        assert_eq!(config.race_mode, RaceMode::TimeTrial);
        assert_eq!(config.text_category, TextCategory::Words);
        assert_eq!(config.race_rules().time_limit, Duration::from_secs(60));
        // Untouched fields keep their defaults
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.accuracy_threshold, 92.0);
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            max_line_width: 64,
            text_category: TextCategory::Rust,
            race_mode: RaceMode::Accuracy,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_line_width = \"wide\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let cases = [
            (Config { max_line_width: 1, ..Config::default() }, "max_line_width"),
            (Config { lines_shown: 0, ..Config::default() }, "lines_shown"),
            (Config { word_count: 0, ..Config::default() }, "word_count"),
            (Config { accuracy_threshold: 0.0, ..Config::default() }, "accuracy_threshold"),
            (Config { accuracy_threshold: 100.5, ..Config::default() }, "accuracy_threshold"),
            (Config { accuracy_threshold: f64::NAN, ..Config::default() }, "accuracy_threshold"),
            (Config { time_trial_secs: 0, ..Config::default() }, "time_trial_secs"),
            (Config { tab_width: 0, ..Config::default() }, "tab_width"),
            (Config { history_capacity: 0, ..Config::default() }, "history_capacity"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_accuracy_threshold_of_100_is_allowed() {
        let config = Config {
            accuracy_threshold: 100.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_options_carry_rules() {
        let config = Config {
            max_line_width: 40,
            tab_width: 2,
            ..Config::default()
        };
        let options = config.session_options(TextCategory::Python, RaceMode::Accuracy);
        assert_eq!(options.max_width, 40);
        assert_eq!(options.rules.tab_width, 2);
        assert_eq!(options.category, TextCategory::Python);
        assert_eq!(options.mode, RaceMode::Accuracy);
    }
}
