use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::text::TextCategory;

/// What a key press means to the race.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceInput {
    Type(char),
    DeleteChar,
    DeleteWord,
    Command(Command),
    Ignore,
}

/// Keys handled by the command layer rather than the typing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewText,
    NextMode,
    SelectCategory(TextCategory),
}

pub fn classify(key: &KeyEvent) -> RaceInput {
    // Repeat and release events would inflate the typed buffer.
    if key.kind != KeyEventKind::Press {
        return RaceInput::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => RaceInput::Command(Command::Quit),
        KeyCode::Char('q' | 'c') if ctrl => RaceInput::Command(Command::Quit),
        KeyCode::Char('r') if ctrl => RaceInput::Command(Command::NewText),
        KeyCode::Char('t') if ctrl => RaceInput::Command(Command::NextMode),
        KeyCode::Char('w') if ctrl => RaceInput::DeleteWord,
        KeyCode::Backspace if ctrl || alt => RaceInput::DeleteWord,
        KeyCode::Backspace => RaceInput::DeleteChar,
        KeyCode::F(n @ 1..=5) => TextCategory::ALL
            .get(usize::from(n - 1))
            .map_or(RaceInput::Ignore, |&c| {
                RaceInput::Command(Command::SelectCategory(c))
            }),
        KeyCode::Enter => RaceInput::Type('\r'),
        KeyCode::Tab => RaceInput::Type('\t'),
        KeyCode::Char(_) if ctrl || alt => RaceInput::Ignore,
        KeyCode::Char(ch) => RaceInput::Type(ch),
        _ => RaceInput::Ignore,
    }
}
