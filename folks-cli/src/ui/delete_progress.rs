use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::bar_chart::progress_bar;
use super::layout::centered;
use super::spinner;
use super::theme::Theme;

/// Progress overlay shown while records are deleted one by one
pub struct DeleteProgressView<'a> {
    completed: usize,
    total: usize,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> DeleteProgressView<'a> {
    pub fn new(completed: usize, total: usize, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            completed,
            total,
            spinner_frame,
            theme,
        }
    }
}

impl Widget for DeleteProgressView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = centered(50, 8, area);
        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Deleting... ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.yellow))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        if inner.height < 2 {
            return;
        }

        let count = format!(
            "{} {} / {} deleted",
            spinner(self.spinner_frame),
            self.completed,
            self.total
        );
        buf.set_string(inner.x, inner.y, &count, Style::default().fg(self.theme.fg));

        let bar = progress_bar(self.completed, self.total, inner.width as usize);
        buf.set_string(
            inner.x,
            inner.y + 1,
            &bar,
            Style::default().fg(self.theme.green),
        );

        if inner.height > 3 {
            buf.set_string(
                inner.x,
                inner.y + inner.height - 1,
                "Press q to quit",
                Style::default().fg(self.theme.fg_dim),
            );
        }
    }
}
