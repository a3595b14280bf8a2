use folks_core::ListState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use super::layout::centered;
use super::theme::Theme;

/// Shown ids before collapsing into "...and N more"
const MAX_LISTED: usize = 5;

/// Bulk delete confirmation dialog
pub struct ConfirmDeleteView<'a> {
    state: &'a ListState,
    theme: &'a Theme,
}

impl<'a> ConfirmDeleteView<'a> {
    pub fn new(state: &'a ListState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for ConfirmDeleteView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ids = self.state.selection().ids();
        let count = ids.len();
        let has_more = count > MAX_LISTED;

        // header + ids + "...and N more" + blank + hints, plus borders and padding
        let content_lines = 1 + count.min(MAX_LISTED) + usize::from(has_more) + 2;
        let dialog_area = centered(56, content_lines as u16 + 4, area);

        Clear.render(dialog_area, buf);

        let block = Block::default()
            .title(" Delete Records? ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.red))
            .style(Style::default().bg(self.theme.bg_surface))
            .padding(Padding::uniform(1));

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        if inner.height == 0 || inner.width < 10 {
            return;
        }

        let text_style = Style::default().fg(self.theme.fg);
        let name_style = Style::default()
            .fg(self.theme.yellow)
            .add_modifier(Modifier::BOLD);
        let dim_style = Style::default().fg(self.theme.fg_dim);
        let key_style = Style::default()
            .fg(self.theme.green)
            .add_modifier(Modifier::BOLD);

        // Last row is reserved for the key hints
        let hints_y = inner.y + inner.height - 1;
        let mut row = inner.y;
        if row < hints_y {
            let header = format!(
                "Delete {} selected record{}?",
                count,
                if count == 1 { "" } else { "s" }
            );
            buf.set_string(inner.x, row, &header, text_style);
            row += 1;
        }

        // Names are only known for records on the visible page
        for id in ids.iter().take(MAX_LISTED) {
            if row >= hints_y {
                break;
            }
            let label = match self.state.rows().iter().find(|p| p.id == *id) {
                Some(person) => format!("#{} {}", id, person.name),
                None => format!("#{} (other page)", id),
            };
            let label: String = label.chars().take(inner.width as usize - 1).collect();
            buf.set_string(inner.x + 1, row, &label, name_style);
            row += 1;
        }

        if has_more && row < hints_y {
            let more = format!("  ...and {} more", count - MAX_LISTED);
            buf.set_string(inner.x, row, &more, dim_style);
        }

        buf.set_string(inner.x, hints_y, "[y]", key_style);
        buf.set_string(inner.x + 4, hints_y, "Delete", text_style);
        buf.set_string(inner.x + 12, hints_y, "[n]", key_style);
        buf.set_string(inner.x + 16, hints_y, "Cancel", text_style);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use folks_core::{Event, ListConfig, Page, Person, PersonId};

    use super::*;

    fn confirming(count: u64) -> ListState {
        let (mut state, _) = ListState::new(ListConfig::default());
        let items = (1..=count)
            .map(|id| Person {
                id: PersonId(id),
                name: format!("Person {}", id),
                age: 30,
                hobbies: Vec::new(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            })
            .collect();
        let generation = state.generation();
        state.reduce(Event::PageLoaded {
            generation,
            page: Page {
                items,
                next: None,
                previous: None,
                total_count: count,
            },
        });
        state.reduce(Event::ToggleAll(true));
        state.reduce(Event::RequestDelete);
        state
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn screen(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height).map(|y| line(buf, y)).collect()
    }

    #[test]
    fn test_short_terminal_keeps_rows_inside_dialog() {
        let state = confirming(7);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 9);
        let mut buf = Buffer::empty(area);
        ConfirmDeleteView::new(&state, &theme).render(area, &mut buf);

        let lines = screen(&buf);
        assert!(lines.iter().any(|l| l.contains("[y] Delete")));
        assert!(!lines.iter().any(|l| l.contains("#1 Person 1")));
    }

    #[test]
    fn test_long_selection_collapses() {
        let state = confirming(7);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        ConfirmDeleteView::new(&state, &theme).render(area, &mut buf);

        let lines = screen(&buf);
        assert!(lines.iter().any(|l| l.contains("Delete 7 selected records?")));
        assert!(lines.iter().any(|l| l.contains("#5 Person 5")));
        assert!(!lines.iter().any(|l| l.contains("#6 Person 6")));
        assert!(lines.iter().any(|l| l.contains("...and 2 more")));
        assert!(lines.iter().any(|l| l.contains("[y] Delete")));
    }
}
