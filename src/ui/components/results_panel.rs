use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::result::RaceResult;
use crate::ui::layout::pack_hint_lines;
use crate::ui::theme::Theme;

const HINTS: &[&str] = &[
    "[Esc] Quit",
    "[^R] New text",
    "[^T] Next mode",
    "[F1-F5] Category",
    "[^W] Delete word",
];

/// Footer: the finished race's numbers when there are any, then key hints and
/// the latest status message.
pub struct ResultsPanel<'a> {
    result: Option<&'a RaceResult>,
    status_message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(
        result: Option<&'a RaceResult>,
        status_message: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            status_message,
            theme,
        }
    }
}

pub fn summary(result: &RaceResult) -> String {
    format!(
        "{}: {} wpm, {:.1}% accuracy, {} errors, {}/{} chars in {:.1}s",
        result.reason.label(),
        result.wpm,
        result.accuracy,
        result.errors_made,
        result.typed_chars,
        result.total_chars,
        result.elapsed_secs
    )
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();

        if let Some(result) = self.result {
            let color = if result.reason.is_success() {
                colors.success()
            } else {
                colors.error()
            };
            lines.push(Line::from(Span::styled(
                format!(" {}", summary(result)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(message) = self.status_message {
            lines.push(Line::from(Span::styled(
                format!(" {message}"),
                Style::default().fg(colors.error()),
            )));
        }
        let width = usize::from(area.width.saturating_sub(2));
        lines.extend(
            pack_hint_lines(HINTS, width)
                .into_iter()
                .map(|hint| Line::from(Span::styled(hint, Style::default().fg(colors.text_pending())))),
        );

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
