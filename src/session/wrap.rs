use crate::error::SessionError;

pub const MIN_LINE_WIDTH: usize = 2;
pub const MAX_LINE_WIDTH: usize = 1024;

/// Raw text laid out into display lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// Number of characters the user has to type to finish the text.
    pub total_chars: usize,
}

/// Word-wrap `raw_lines` at `max_width` characters.
///
/// A line longer than `max_width` is broken after the last space at or before
/// column `max_width`, so the break space may sit one column past the width.
/// Every display line that ends a source line then gets `sentinel` appended,
/// except the end of the text; the sentinel does not count toward the width.
/// Blank source lines are dropped and trailing whitespace is ignored, so the
/// concatenated output does not depend on the width.
pub fn wrap<S: AsRef<str>>(
    raw_lines: &[S],
    max_width: usize,
    sentinel: char,
) -> Result<WrappedText, SessionError> {
    if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&max_width) {
        return Err(SessionError::InvalidWidth {
            width: max_width,
            min: MIN_LINE_WIDTH,
            max: MAX_LINE_WIDTH,
        });
    }

    let last = raw_lines
        .iter()
        .rposition(|l| !l.as_ref().trim().is_empty())
        .ok_or(SessionError::EmptyText)?;

    let mut lines = Vec::new();
    let mut total_chars = 0;

    for (idx, raw) in raw_lines[..=last].iter().enumerate() {
        let raw = raw.as_ref().trim_end();
        if raw.is_empty() {
            continue;
        }

        let mut rest: Vec<char> = raw.chars().collect();

        while rest.len() > max_width {
            let split = rest[..=max_width]
                .iter()
                .rposition(|&c| c == ' ')
                .ok_or(SessionError::UnbreakableLine {
                    line: idx + 1,
                    width: max_width,
                })?;
            let tail = rest.split_off(split + 1);
            total_chars += rest.len();
            lines.push(rest.into_iter().collect());
            rest = tail;
        }

        if idx != last {
            rest.push(sentinel);
        }
        total_chars += rest.len();
        lines.push(rest.into_iter().collect());
    }

    Ok(WrappedText { lines, total_chars })
}
