use std::fs;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::error::TextError;

/// End-of-line marker for code, where line breaks are part of the text.
pub const NEWLINE_SENTINEL: char = '\u{21b5}'; // ↵
/// End-of-line marker for prose, where wrapped lines just continue the sentence.
pub const SPACE_SENTINEL: char = ' ';

#[derive(Embed)]
#[folder = "assets/texts/"]
struct TextAssets;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCategory {
    Words,
    Quotes,
    Rust,
    Python,
    TypeScript,
}

impl TextCategory {
    pub const ALL: [TextCategory; 5] = [
        TextCategory::Words,
        TextCategory::Quotes,
        TextCategory::Rust,
        TextCategory::Python,
        TextCategory::TypeScript,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextCategory::Words => "Words",
            TextCategory::Quotes => "Quotes",
            TextCategory::Rust => "Rust",
            TextCategory::Python => "Python",
            TextCategory::TypeScript => "TypeScript",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "words" => Some(TextCategory::Words),
            "quotes" => Some(TextCategory::Quotes),
            "rust" => Some(TextCategory::Rust),
            "python" => Some(TextCategory::Python),
            "typescript" | "ts" => Some(TextCategory::TypeScript),
            _ => None,
        }
    }

    pub fn is_code(self) -> bool {
        matches!(
            self,
            TextCategory::Rust | TextCategory::Python | TextCategory::TypeScript
        )
    }

    /// Character appended to every display line that ends a source line.
    pub fn sentinel(self) -> char {
        if self.is_code() {
            NEWLINE_SENTINEL
        } else {
            SPACE_SENTINEL
        }
    }

    fn asset_dir(self) -> &'static str {
        match self {
            TextCategory::Words => "words/",
            TextCategory::Quotes => "quotes/",
            TextCategory::Rust => "rust/",
            TextCategory::Python => "python/",
            TextCategory::TypeScript => "typescript/",
        }
    }
}

/// Split file content into raw lines, dropping `\r` and trailing whitespace.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(|l| l.trim_end().to_string()).collect()
}

/// Reads a practice file. Tabs become `tab_width` spaces so they can be typed
/// with the Tab key.
pub fn load_file(path: &Path, tab_width: usize) -> Result<Vec<String>, TextError> {
    let content = fs::read_to_string(path).map_err(|source| TextError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let spaces = " ".repeat(tab_width);
    Ok(split_lines(&content.replace('\t', &spaces)))
}

/// Bundled practice texts.
pub struct TextLibrary {
    word_count: usize,
}

impl TextLibrary {
    pub fn new(word_count: usize) -> Self {
        Self {
            word_count: word_count.max(1),
        }
    }

    pub fn load<R: Rng>(&self, category: TextCategory, rng: &mut R) -> Result<Vec<String>, TextError> {
        match category {
            TextCategory::Words => self.word_race(rng),
            other => random_file(other, rng),
        }
    }

    /// A single raw line of shuffled words.
    fn word_race<R: Rng>(&self, rng: &mut R) -> Result<Vec<String>, TextError> {
        let content = read_asset("words/en.txt")?;
        let mut words: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(TextError::MissingAsset("words/en.txt".to_string()));
        }
        words.shuffle(rng);
        let picked: Vec<&str> = words.iter().cycle().take(self.word_count).copied().collect();
        Ok(vec![picked.join(" ")])
    }
}

fn random_file<R: Rng>(category: TextCategory, rng: &mut R) -> Result<Vec<String>, TextError> {
    let dir = category.asset_dir();
    let files: Vec<String> = TextAssets::iter()
        .filter(|f| f.starts_with(dir))
        .map(|f| f.to_string())
        .collect();
    let file = files
        .choose(rng)
        .ok_or_else(|| TextError::MissingAsset(dir.to_string()))?;
    Ok(split_lines(&read_asset(file)?))
}

fn read_asset(name: &str) -> Result<String, TextError> {
    let file = TextAssets::get(name).ok_or_else(|| TextError::MissingAsset(name.to_string()))?;
    String::from_utf8(file.data.into_owned()).map_err(|_| TextError::InvalidAsset(name.to_string()))
}
