use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::history::KeyHighlightTracker;
use crate::keyboard::model::KeyboardModel;
use crate::ui::theme::Theme;

/// Physical keyboard with the most recent presses lit, brightest first.
pub struct KeyboardDiagram<'a> {
    pub model: &'a KeyboardModel,
    pub history: &'a KeyHighlightTracker,
    pub theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(
        model: &'a KeyboardModel,
        history: &'a KeyHighlightTracker,
        theme: &'a Theme,
    ) -> Self {
        Self {
            model,
            history,
            theme,
        }
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Keyboard ({}) ", self.model.name))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < KeyboardModel::HEIGHT || inner.width < KeyboardModel::WIDTH {
            return;
        }
        let left = inner.x + (inner.width - KeyboardModel::WIDTH) / 2;

        let resting = Style::default().fg(colors.key());
        for key in self.model.keys() {
            buf.set_string(left + key.column, inner.y + key.row, key.label(), resting);
        }

        // Oldest first so a newer press of the same key paints over it.
        let presses: Vec<_> = self.history.slots().collect();
        for (rank, press) in presses.into_iter().rev() {
            let Some(key) = self.model.keys().find(|k| k.base == press.key) else {
                continue;
            };
            let (offset, label) = key.highlight_label(press.shift);
            let style = Style::default()
                .fg(colors.history(rank))
                .add_modifier(Modifier::BOLD);
            buf.set_string(left + key.column + offset, inner.y + key.row, label, style);
        }
    }
}
