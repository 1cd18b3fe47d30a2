use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::result;
use crate::text::TextCategory;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceMode {
    #[default]
    Completion,
    Accuracy,
    TimeTrial,
}

impl RaceMode {
    pub fn label(self) -> &'static str {
        match self {
            RaceMode::Completion => "Completion",
            RaceMode::Accuracy => "Accuracy",
            RaceMode::TimeTrial => "Time trial",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "completion" => Some(RaceMode::Completion),
            "accuracy" => Some(RaceMode::Accuracy),
            "time_trial" | "time" => Some(RaceMode::TimeTrial),
            _ => None,
        }
    }

    /// Modes offered for a text category. Time trials only make sense on word
    /// lists, which have no natural end.
    pub fn available_for(category: TextCategory) -> &'static [RaceMode] {
        match category {
            TextCategory::Words => &[RaceMode::Completion, RaceMode::Accuracy, RaceMode::TimeTrial],
            _ => &[RaceMode::Completion, RaceMode::Accuracy],
        }
    }

    pub fn next_for(self, category: TextCategory) -> RaceMode {
        let modes = Self::available_for(category);
        match modes.iter().position(|&m| m == self) {
            Some(idx) => modes[(idx + 1) % modes.len()],
            None => modes[0],
        }
    }
}

/// Tunables for the accuracy and time-trial modes and for tab expansion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaceRules {
    /// Accuracy races stop once running accuracy drops below this percentage.
    pub accuracy_threshold: f64,
    /// Accuracy is not judged until this many characters are typed.
    pub accuracy_min_chars: usize,
    pub time_limit: Duration,
    /// Spaces a typed tab stands for.
    pub tab_width: usize,
}

impl Default for RaceRules {
    fn default() -> Self {
        Self {
            accuracy_threshold: 92.0,
            accuracy_min_chars: 10,
            time_limit: Duration::from_secs(30),
            tab_width: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The whole text was typed.
    Completed,
    /// Accuracy dropped below the threshold.
    AccuracyDropped,
    /// The time-trial duration ran out.
    TimeExpired,
}

impl FinishReason {
    pub fn is_success(self) -> bool {
        !matches!(self, FinishReason::AccuracyDropped)
    }

    pub fn label(self) -> &'static str {
        match self {
            FinishReason::Completed => "Finished",
            FinishReason::AccuracyDropped => "Stopped: accuracy too low",
            FinishReason::TimeExpired => "Time's up",
        }
    }
}

/// Session counters the policy looks at after each accepted character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub typed: usize,
    pub total: usize,
    pub errors_made: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TerminationPolicy {
    Completion,
    Accuracy { threshold: f64, min_chars: usize },
    TimeTrial { limit: Duration },
}

impl TerminationPolicy {
    pub fn for_mode(mode: RaceMode, rules: &RaceRules) -> Self {
        match mode {
            RaceMode::Completion => TerminationPolicy::Completion,
            RaceMode::Accuracy => TerminationPolicy::Accuracy {
                threshold: rules.accuracy_threshold,
                min_chars: rules.accuracy_min_chars,
            },
            RaceMode::TimeTrial => TerminationPolicy::TimeTrial {
                limit: rules.time_limit,
            },
        }
    }

    /// Decide whether the session ends now. Reaching the end of the text always
    /// finishes the race, whatever the mode.
    pub fn evaluate(&self, progress: &Progress) -> Option<FinishReason> {
        if progress.typed >= progress.total {
            return Some(FinishReason::Completed);
        }
        match *self {
            TerminationPolicy::Completion => None,
            TerminationPolicy::Accuracy {
                threshold,
                min_chars,
            } => {
                if progress.typed < min_chars {
                    return None;
                }
                result::accuracy(progress.errors_made, progress.typed)
                    .filter(|&acc| acc < threshold)
                    .map(|_| FinishReason::AccuracyDropped)
            }
            // Only sampled on keystrokes: an idle user is not stopped.
            TerminationPolicy::TimeTrial { limit } => {
                (progress.elapsed >= limit).then_some(FinishReason::TimeExpired)
            }
        }
    }
}
