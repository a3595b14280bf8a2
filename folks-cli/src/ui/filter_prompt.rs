use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::app::{FilterField, FilterInput};

use super::layout::centered;
use super::theme::Theme;

/// Date filter prompt with start and end fields
pub struct FilterPrompt<'a> {
    input: &'a FilterInput,
    theme: &'a Theme,
}

impl<'a> FilterPrompt<'a> {
    pub fn new(input: &'a FilterInput, theme: &'a Theme) -> Self {
        Self { input, theme }
    }
}

impl Widget for FilterPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered(44, 9, area);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Filter by created date ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.teal))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        if inner.height < 3 || inner.width < 30 {
            return;
        }

        let label_style = Style::default().fg(self.theme.fg_dim);
        let fields = [
            ("From", &self.input.start, FilterField::Start),
            ("To", &self.input.end, FilterField::End),
        ];
        for (i, (label, value, field)) in fields.into_iter().enumerate() {
            let y = inner.y + i as u16;
            let focused = self.input.focus == field;
            buf.set_string(inner.x, y, label, label_style);

            let value_style = if focused {
                Style::default()
                    .fg(self.theme.fg)
                    .bg(self.theme.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.fg)
            };
            let shown = if value.is_empty() && !focused {
                "any".to_string()
            } else {
                format!("{:<10}{}", value, if focused { "▏" } else { " " })
            };
            buf.set_string(inner.x + 6, y, shown, value_style);
        }

        buf.set_string(
            inner.x,
            inner.y + inner.height - 1,
            "YYYY-MM-DD, empty for no bound",
            Style::default().fg(self.theme.fg_muted),
        );
    }
}
