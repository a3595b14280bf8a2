use folks_core::ListState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::app::AppMode;

use super::theme::Theme;

/// Footer widget showing keyboard hints and the selection count
pub struct Footer<'a> {
    mode: AppMode,
    state: &'a ListState,
    theme: &'a Theme,
}

impl<'a> Footer<'a> {
    pub fn new(mode: AppMode, state: &'a ListState, theme: &'a Theme) -> Self {
        Self { mode, state, theme }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.mode {
            AppMode::Browsing => {
                let mut hints = vec![("↑↓", "Move"), ("Space", "Check")];
                if self.state.can_go_previous() {
                    hints.push(("←", "Prev"));
                }
                if self.state.can_go_next() {
                    hints.push(("→", "Next"));
                }
                hints.extend([
                    ("1-3", "Sort"),
                    ("f", "Filter"),
                    ("d", "Delete"),
                    ("s", "Stats"),
                    ("?", "Help"),
                    ("q", "Quit"),
                ]);
                hints
            }
            AppMode::Help => vec![("Esc", "Close help"), ("q", "Close")],
            AppMode::EditFilter => vec![
                ("Tab", "Switch field"),
                ("Enter", "Apply"),
                ("Esc", "Cancel"),
            ],
            AppMode::ConfirmDelete => vec![("y", "Yes"), ("n", "Cancel")],
            AppMode::Deleting => vec![("q", "Quit")],
        }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 1 {
            return;
        }

        let key_style = Style::default()
            .fg(self.theme.fg)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(self.theme.fg_dim);
        let sep_style = Style::default().fg(self.theme.border);

        let hints = self.hints();
        let mut x = area.x + 1;
        for (i, (key, desc)) in hints.iter().enumerate() {
            buf.set_string(x, area.y, *key, key_style);
            x += key.chars().count() as u16 + 1;

            buf.set_string(x, area.y, *desc, desc_style);
            x += desc.len() as u16;

            if i < hints.len() - 1 {
                buf.set_string(x, area.y, "  │  ", sep_style);
                x += 5;
            }

            if x >= area.x + area.width - 5 {
                break;
            }
        }

        // Checked count on the right, across all pages
        let count = self.state.selection().len();
        if count > 0 {
            let text = format!("{} checked", count);
            let style = Style::default()
                .fg(self.theme.purple)
                .add_modifier(Modifier::BOLD);
            let text_x = (area.x + area.width).saturating_sub(text.len() as u16 + 1);
            if text_x > x + 2 {
                buf.set_string(text_x, area.y, &text, style);
            }
        }
    }
}
