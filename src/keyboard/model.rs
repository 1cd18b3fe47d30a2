use crossterm::event::KeyCode;
use tracing::warn;

use crate::keyboard::display::{self, BACKSPACE, ENTER, SPACE, TAB};

/// A key on the drawn keyboard. Keys that do not type a character use the
/// sentinels from [`display`] as their `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalKey {
    pub base: char,
    pub shifted: Option<char>,
    pub row: u16,
    pub column: u16,
}

impl PhysicalKey {
    fn symbol(base: char, shifted: char, row: u16, column: u16) -> Self {
        Self {
            base,
            shifted: Some(shifted),
            row,
            column,
        }
    }

    fn named(base: char, row: u16, column: u16) -> Self {
        Self {
            base,
            shifted: None,
            row,
            column,
        }
    }

    pub fn is_letter(&self) -> bool {
        self.base.is_alphabetic()
    }

    /// Label drawn when the key is not highlighted: `Q` for letters, both
    /// characters (`1!`) for symbol keys, the key name otherwise.
    pub fn label(&self) -> String {
        if display::is_named_key(self.base) {
            return display::key_display_name(self.base).to_string();
        }
        match self.shifted {
            _ if self.is_letter() => self.base.to_uppercase().collect(),
            Some(shifted) => format!("{}{shifted}", self.base),
            None => self.base.to_string(),
        }
    }

    /// Column offset within the label and text to draw for a highlighted press.
    /// Symbol keys light up only the character that was actually produced.
    pub fn highlight_label(&self, shift: bool) -> (u16, String) {
        match self.shifted {
            Some(shifted) if !self.is_letter() && !display::is_named_key(self.base) => {
                if shift {
                    (1, shifted.to_string())
                } else {
                    (0, self.base.to_string())
                }
            }
            _ => (0, self.label()),
        }
    }

    pub fn produces(&self, ch: char) -> bool {
        self.base == ch || self.shifted == Some(ch)
    }
}

/// Immutable physical layout table, built once and shared by reference.
#[derive(Clone, Debug)]
pub struct KeyboardModel {
    pub name: &'static str,
    pub rows: Vec<Vec<PhysicalKey>>,
}

impl KeyboardModel {
    /// Columns needed to draw the widest row.
    pub const WIDTH: u16 = 62;
    pub const HEIGHT: u16 = 5;

    pub fn qwerty() -> Self {
        Self::from_rows(
            "qwerty",
            [
                ("`1234567890-=", "~!@#$%^&*()_+"),
                ("qwertyuiop[]\\", "QWERTYUIOP{}|"),
                ("asdfghjkl;'", "ASDFGHJKL:\""),
                ("zxcvbnm,./", "ZXCVBNM<>?"),
            ],
        )
    }

    pub fn dvorak() -> Self {
        Self::from_rows(
            "dvorak",
            [
                ("`1234567890[]", "~!@#$%^&*(){}"),
                ("',.pyfgcrl/=\\", "\"<>PYFGCRL?+|"),
                ("aoeuidhtns-", "AOEUIDHTNS_"),
                (";qjkxbmwvz", ":QJKXBMWVZ"),
            ],
        )
    }

    pub fn colemak() -> Self {
        Self::from_rows(
            "colemak",
            [
                ("`1234567890-=", "~!@#$%^&*()_+"),
                ("qwfpgjluy;[]\\", "QWFPGJLUY:{}|"),
                ("arstdhneio'", "ARSTDHNEIO\""),
                ("zxcvbkm,./", "ZXCVBKM<>?"),
            ],
        )
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "qwerty" => Self::qwerty(),
            "dvorak" => Self::dvorak(),
            "colemak" => Self::colemak(),
            other => {
                warn!(layout = other, "unknown keyboard layout, using qwerty");
                Self::qwerty()
            }
        }
    }

    /// Character rows plus Backspace, Tab, Enter and a space bar, staggered like
    /// a real keyboard with four columns per key.
    fn from_rows(name: &'static str, rows: [(&str, &str); 4]) -> Self {
        const INDENT: [u16; 4] = [1, 5, 6, 8];
        const KEY_WIDTH: u16 = 4;

        let mut out: Vec<Vec<PhysicalKey>> = rows
            .iter()
            .zip(INDENT)
            .enumerate()
            .map(|(row, (&(base, shifted), indent))| {
                base.chars()
                    .zip(shifted.chars())
                    .zip((0u16..).map(|i| indent + i * KEY_WIDTH))
                    .map(|((b, s), column)| PhysicalKey::symbol(b, s, row as u16, column))
                    .collect()
            })
            .collect();

        let row_end = |keys: &[PhysicalKey]| keys.last().map_or(0, |k| k.column + KEY_WIDTH);
        let backspace_col = row_end(&out[0]);
        out[0].push(PhysicalKey::named(BACKSPACE, 0, backspace_col));
        out[1].insert(0, PhysicalKey::named(TAB, 1, 0));
        let enter_col = row_end(&out[2]);
        out[2].push(PhysicalKey::named(ENTER, 2, enter_col));
        out.push(vec![PhysicalKey::named(SPACE, 4, 21)]);

        Self { name, rows: out }
    }

    pub fn keys(&self) -> impl Iterator<Item = &PhysicalKey> {
        self.rows.iter().flatten()
    }

    /// Physical key that produced `code`, if it is on this keyboard.
    pub fn key_for(&self, code: KeyCode) -> Option<&PhysicalKey> {
        let ch = match code {
            KeyCode::Backspace => BACKSPACE,
            KeyCode::Tab => TAB,
            KeyCode::Enter => ENTER,
            KeyCode::Char(ch) => ch,
            _ => return None,
        };
        self.physical_key_for(ch)
    }

    pub fn physical_key_for(&self, ch: char) -> Option<&PhysicalKey> {
        self.keys().find(|k| k.produces(ch))
    }
}

impl Default for KeyboardModel {
    fn default() -> Self {
        Self::qwerty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qwerty_covers_printable_ascii() {
        let model = KeyboardModel::qwerty();
        for ch in (' '..='~').filter(|c| !c.is_control()) {
            assert!(
                model.physical_key_for(ch).is_some(),
                "KeyboardModel::qwerty() missing char: {ch:?}"
            );
        }
    }

    #[test]
    fn test_every_layout_covers_letters() {
        for model in [
            KeyboardModel::qwerty(),
            KeyboardModel::dvorak(),
            KeyboardModel::colemak(),
        ] {
            for ch in ('a'..='z').chain('A'..='Z') {
                assert!(
                    model.physical_key_for(ch).is_some(),
                    "{} missing {ch:?}",
                    model.name
                );
            }
        }
    }

    #[test]
    fn test_shifted_chars_map_to_same_key() {
        let model = KeyboardModel::qwerty();
        let one = model.key_for(KeyCode::Char('1')).unwrap();
        let bang = model.key_for(KeyCode::Char('!')).unwrap();
        assert_eq!(one, bang);
        assert_eq!(model.key_for(KeyCode::Char('A')).unwrap().base, 'a');
    }

    #[test]
    fn test_named_keys() {
        let model = KeyboardModel::qwerty();
        assert_eq!(model.key_for(KeyCode::Backspace).unwrap().label(), "Backspace");
        assert_eq!(model.key_for(KeyCode::Tab).unwrap().label(), "Tab");
        assert_eq!(model.key_for(KeyCode::Enter).unwrap().label(), "Enter");
        assert_eq!(model.key_for(KeyCode::Char(' ')).unwrap().label(), "Space");
        assert!(model.key_for(KeyCode::Esc).is_none());
        assert!(model.key_for(KeyCode::Char('é')).is_none());
    }

    #[test]
    fn test_row_shapes() {
        let model = KeyboardModel::qwerty();
        assert_eq!(model.rows.len(), 5);
        assert_eq!(model.rows[0].len(), 14); // number row + Backspace
        assert_eq!(model.rows[1].len(), 14); // Tab + top row
        assert_eq!(model.rows[2].len(), 12); // home row + Enter
        assert_eq!(model.rows[3].len(), 10);
        assert_eq!(model.rows[4].len(), 1);
    }

    #[test]
    fn test_keys_fit_in_width() {
        for model in [KeyboardModel::qwerty(), KeyboardModel::dvorak()] {
            for key in model.keys() {
                let width = key.label().chars().count() as u16;
                assert!(
                    key.column + width <= KeyboardModel::WIDTH,
                    "{:?} overflows",
                    key.base
                );
                assert!(key.row < KeyboardModel::HEIGHT);
            }
        }
    }

    #[test]
    fn test_labels() {
        let model = KeyboardModel::qwerty();
        let q = model.physical_key_for('q').unwrap();
        assert_eq!(q.label(), "Q");
        assert_eq!(q.highlight_label(true), (0, "Q".to_string()));

        let one = model.physical_key_for('1').unwrap();
        assert_eq!(one.label(), "1!");
        assert_eq!(one.highlight_label(false), (0, "1".to_string()));
        assert_eq!(one.highlight_label(true), (1, "!".to_string()));
    }

    #[test]
    fn test_from_name_falls_back_to_qwerty() {
        assert_eq!(KeyboardModel::from_name("Dvorak").name, "dvorak");
        assert_eq!(KeyboardModel::from_name("workman").name, "qwerty");
    }
}
