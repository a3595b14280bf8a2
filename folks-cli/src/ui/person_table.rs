use folks_core::{ListState, OrderField, Person};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::Theme;

const CHECK_WIDTH: usize = 4;
const AGE_WIDTH: usize = 5;
const CREATED_WIDTH: usize = 17;

/// The records table with a checkbox column
pub struct PersonTable<'a> {
    state: &'a ListState,
    cursor: usize,
    scroll_offset: usize,
    theme: &'a Theme,
}

impl<'a> PersonTable<'a> {
    pub fn new(state: &'a ListState, cursor: usize, scroll_offset: usize, theme: &'a Theme) -> Self {
        Self {
            state,
            cursor,
            scroll_offset,
            theme,
        }
    }

    fn column_title(&self, field: OrderField) -> String {
        let order = self.state.order();
        if order.field == field {
            format!("{} {}", field.label(), order.direction.arrow())
        } else {
            field.label().to_string()
        }
    }
}

/// Cut `text` to `width` chars, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

impl Widget for PersonTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < 40 {
            return;
        }

        let rows = self.state.rows();
        let flexible = area.width as usize - CHECK_WIDTH - AGE_WIDTH - CREATED_WIDTH - 4;
        let name_width = flexible * 2 / 5;
        let hobbies_width = flexible - name_width;

        let name_x = area.x + 1 + CHECK_WIDTH as u16;
        let age_x = name_x + name_width as u16 + 1;
        let hobbies_x = age_x + AGE_WIDTH as u16 + 1;
        let created_x = hobbies_x + hobbies_width as u16 + 1;

        // Column titles
        let title_style = Style::default()
            .fg(self.theme.fg_dim)
            .add_modifier(Modifier::BOLD);
        let all_style = if self.state.is_loading() {
            Style::default().fg(self.theme.fg_muted)
        } else {
            Style::default().fg(self.theme.purple)
        };
        buf.set_string(
            area.x + 1,
            area.y,
            checkbox(self.state.all_checked()),
            all_style,
        );
        buf.set_string(name_x, area.y, self.column_title(OrderField::Name), title_style);
        buf.set_string(age_x, area.y, self.column_title(OrderField::Age), title_style);
        buf.set_string(hobbies_x, area.y, "Hobbies", title_style);
        buf.set_string(
            created_x,
            area.y,
            self.column_title(OrderField::CreatedAt),
            title_style,
        );

        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);

        if rows.is_empty() {
            let message = if self.state.page().is_none() {
                "Loading…"
            } else {
                "No records found"
            };
            let x = body.x + (body.width.saturating_sub(message.chars().count() as u16)) / 2;
            buf.set_string(
                x,
                body.y + body.height / 2,
                message,
                Style::default().fg(self.theme.fg_muted),
            );
            return;
        }

        for (i, person) in rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(body.height as usize)
        {
            let y = body.y + (i - self.scroll_offset) as u16;
            let is_cursor = i == self.cursor;
            let is_checked = self.state.is_selected(person.id);
            let bg = self.theme.row_bg(is_cursor, is_checked);
            let fg = if is_cursor {
                self.theme.selection_fg
            } else {
                self.theme.fg
            };
            let row_style = Style::default().bg(bg).fg(fg);

            // Clear the row
            buf.set_string(body.x, y, " ".repeat(body.width as usize), row_style);

            let check_style = if is_cursor {
                row_style
            } else {
                row_style.fg(self.theme.purple)
            };
            buf.set_string(body.x + 1, y, checkbox(is_checked), check_style);

            render_cells(
                person,
                y,
                [name_x, age_x, hobbies_x, created_x],
                [name_width, hobbies_width],
                row_style,
                if is_cursor {
                    row_style
                } else {
                    row_style.fg(self.theme.fg_dim)
                },
                buf,
            );
        }
    }
}

fn render_cells(
    person: &Person,
    y: u16,
    [name_x, age_x, hobbies_x, created_x]: [u16; 4],
    [name_width, hobbies_width]: [usize; 2],
    style: Style,
    dim: Style,
    buf: &mut Buffer,
) {
    buf.set_string(
        name_x,
        y,
        truncate(&person.name, name_width),
        style.add_modifier(Modifier::BOLD),
    );
    buf.set_string(age_x, y, format!("{:>3}", person.age), style);
    buf.set_string(
        hobbies_x,
        y,
        truncate(&person.hobbies.join(", "), hobbies_width),
        dim,
    );
    buf.set_string(
        created_x,
        y,
        person.created_at.format("%Y-%m-%d %H:%M").to_string(),
        dim,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ada", 5), "Ada");
        assert_eq!(truncate("Ada Lovelace", 5), "Ada …");
        assert_eq!(truncate("Åsa Öberg", 4), "Åsa…");
    }
}
