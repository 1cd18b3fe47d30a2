//! Error types for the race engine and its configuration.

use thiserror::Error;

/// Errors raised while building a typing session. All of them are fatal for the
/// session being constructed: the caller must not render a session that failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("text must contain at least one non-blank line")]
    EmptyText,

    #[error("line width must be between {min} and {max}, got {width}")]
    InvalidWidth { width: usize, min: usize, max: usize },

    #[error("line {line} has no space to wrap at within {width} columns")]
    UnbreakableLine { line: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum TextError {
    #[error("no bundled text at {0}")]
    MissingAsset(String),

    #[error("bundled text {0} is not valid UTF-8")]
    InvalidAsset(String),

    #[error("failed to read practice text from {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
