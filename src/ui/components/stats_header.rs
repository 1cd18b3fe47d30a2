use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::race::TypingSession;
use crate::ui::theme::Theme;

/// One-line live readout of the running race.
pub struct StatsHeader<'a> {
    session: &'a TypingSession,
    theme: &'a Theme,
}

impl<'a> StatsHeader<'a> {
    pub fn new(session: &'a TypingSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

fn stats_text(session: &TypingSession) -> Vec<(&'static str, String)> {
    let accuracy = session
        .running_accuracy()
        .map_or_else(|| "--".to_string(), |a| format!("{a:.1}%"));
    vec![
        ("WPM", session.live_wpm().to_string()),
        ("Accuracy", accuracy),
        ("Errors", session.errors_made().to_string()),
        (
            "Progress",
            format!("{}/{}", session.typed().len(), session.total_chars()),
        ),
        ("Time", format!("{:.0}s", session.elapsed().as_secs_f64())),
    ]
}

impl Widget for StatsHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let label_style = Style::default().fg(colors.fg());
        let value_style = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for (label, value) in stats_text(self.session) {
            spans.push(Span::styled(format!(" {label}: "), label_style));
            spans.push(Span::styled(value, value_style));
            spans.push(Span::raw("  "));
        }

        let block = Block::bordered()
            .title(" keyrace ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
