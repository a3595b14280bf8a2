use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main application layout
pub struct AppLayout {
    pub header: Rect,
    /// Statistics banner; zero height when there is nothing to show
    pub banner: Rect,
    pub table: Rect,
    pub notice: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, show_banner: bool) -> Self {
        let banner = if show_banner { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),      // Header
                Constraint::Length(banner), // Stats banner
                Constraint::Min(5),         // Table
                Constraint::Length(1),      // Notice line
                Constraint::Length(1),      // Footer
            ])
            .split(area);

        Self {
            header: chunks[0],
            banner: chunks[1],
            table: chunks[2],
            notice: chunks[3],
            footer: chunks[4],
        }
    }
}

/// Centered rectangle of at most `width` x `height`, leaving a 2-cell margin
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
