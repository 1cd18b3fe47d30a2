use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::keyboard::model::KeyboardModel;

pub struct AppLayout {
    pub header: Rect,
    pub typing: Rect,
    pub keyboard: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    /// Header, typing area sized for `lines_shown` lines, the keyboard when there
    /// is room for it, and a footer for hints and results.
    pub fn new(area: Rect, lines_shown: usize) -> Self {
        let typing_height = u16::try_from(lines_shown).unwrap_or(u16::MAX).saturating_add(2);
        let keyboard_height = KeyboardModel::HEIGHT + 2;
        let show_keyboard = area.height >= 3 + typing_height + keyboard_height + 3
            && area.width >= KeyboardModel::WIDTH + 2;

        let mut constraints = vec![Constraint::Length(3), Constraint::Length(typing_height)];
        if show_keyboard {
            constraints.push(Constraint::Length(keyboard_height));
        }
        constraints.push(Constraint::Min(3));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        if show_keyboard {
            Self {
                header: chunks[0],
                typing: chunks[1],
                keyboard: Some(chunks[2]),
                footer: chunks[3],
            }
        } else {
            Self {
                header: chunks[0],
                typing: chunks[1],
                keyboard: None,
                footer: chunks[2],
            }
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}
