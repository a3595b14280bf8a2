use folks_core::Notice;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use super::theme::Theme;

/// One-line status message above the footer
pub struct NoticeLine<'a> {
    notice: Option<&'a Notice>,
    theme: &'a Theme,
}

impl<'a> NoticeLine<'a> {
    pub fn new(notice: Option<&'a Notice>, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for NoticeLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notice else {
            return;
        };
        if area.width < 4 || area.height < 1 {
            return;
        }
        let text: String = notice
            .message
            .chars()
            .take(area.width as usize - 2)
            .collect();
        buf.set_string(
            area.x + 1,
            area.y,
            text,
            Style::default().fg(self.theme.notice_color(notice.level)),
        );
    }
}
