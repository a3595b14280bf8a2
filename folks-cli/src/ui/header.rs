use folks_core::{FilterSpec, ListState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::spinner;
use super::theme::Theme;

/// Header widget showing title, query summary and status
pub struct Header<'a> {
    state: &'a ListState,
    spinner_frame: usize,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a ListState, spinner_frame: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            spinner_frame,
            theme,
        }
    }
}

/// `2024-01-01 → …` style summary of the date filter
pub fn filter_summary(filter: &FilterSpec) -> String {
    if filter.is_empty() {
        return "all dates".to_string();
    }
    let show = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "…".to_string())
    };
    format!("{} → {}", show(filter.start_date), show(filter.end_date))
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let title_style = Style::default()
            .fg(self.theme.blue)
            .add_modifier(Modifier::BOLD);
        buf.set_string(area.x + 1, area.y, "FOLKS", title_style);
        buf.set_string(
            area.x + 7,
            area.y,
            "─",
            Style::default().fg(self.theme.border),
        );

        let order = self.state.order();
        let query = format!(
            "{}  ·  {} {}",
            filter_summary(self.state.filter()),
            order.field.label(),
            order.direction.arrow()
        );
        buf.set_string(area.x + 9, area.y, &query, Style::default().fg(self.theme.fg));

        // Status (right-aligned)
        let (status, style) = if self.state.is_loading() {
            (
                format!("{} Loading", spinner(self.spinner_frame)),
                Style::default().fg(self.theme.yellow),
            )
        } else {
            let total = self.state.total_count();
            (
                format!("{} record{}", total, if total == 1 { "" } else { "s" }),
                Style::default().fg(self.theme.fg_dim),
            )
        };
        let status_x = (area.x + area.width).saturating_sub(status.chars().count() as u16 + 2);
        if status_x > area.x + 9 + query.chars().count() as u16 {
            buf.set_string(status_x, area.y, &status, style);
        }
    }
}
