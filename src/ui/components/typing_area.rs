use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::session::race::{CharStatus, TypingSession};
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    session: &'a TypingSession,
    lines_shown: usize,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, lines_shown: usize, theme: &'a Theme) -> Self {
        Self {
            session,
            lines_shown,
            theme,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Correct,
    Incorrect,
    Cursor,
    Pending,
}

/// Characters of one display line with how each should be drawn.
fn line_cells(session: &TypingSession, line: usize) -> Vec<(char, CellKind)> {
    let cursor = session.cursor();
    let finished = session.is_finished();
    session
        .line_statuses(line)
        .into_iter()
        .enumerate()
        .map(|(column, (ch, status))| {
            let kind = match status {
                CharStatus::Correct => CellKind::Correct,
                CharStatus::Incorrect => CellKind::Incorrect,
                CharStatus::Untyped if !finished && cursor.line == line && cursor.column == column => {
                    CellKind::Cursor
                }
                CharStatus::Untyped => CellKind::Pending,
            };
            (ch, kind)
        })
        .collect()
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let lines: Vec<Line> = self
            .session
            .visible_range(self.lines_shown)
            .map(|line| {
                let spans: Vec<Span> = line_cells(self.session, line)
                    .into_iter()
                    .map(|(ch, kind)| {
                        let style = match kind {
                            CellKind::Correct => Style::default().fg(colors.text_correct()),
                            CellKind::Incorrect => Style::default()
                                .fg(colors.text_incorrect())
                                .bg(colors.text_incorrect_bg())
                                .add_modifier(Modifier::UNDERLINED),
                            CellKind::Cursor => Style::default()
                                .fg(colors.text_cursor_fg())
                                .bg(colors.text_cursor_bg()),
                            CellKind::Pending => Style::default().fg(colors.text_pending()),
                        };
                        Span::styled(ch.to_string(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = format!(
            " {} · {} ",
            self.session.category().label(),
            self.session.mode().label()
        );
        let block = Block::bordered()
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        // Lines are pre-wrapped by the session; a second wrap here would break
        // the cursor mapping.
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
