use std::time::{Duration, Instant};

use folks_core::{Controller, DeletePhase, Notice, OrderField, Person};

use super::filter_input::FilterInput;

/// How long a notice stays in the status line
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Pick the notice to show from one batch; the latest wins among equals
fn most_severe(notices: Vec<Notice>) -> Option<Notice> {
    notices.into_iter().max_by_key(|notice| notice.level)
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the table
    Browsing,
    /// Showing help overlay
    Help,
    /// Editing the date filter
    EditFilter,
    /// Showing delete confirmation dialog
    ConfirmDelete,
    /// Bulk delete in progress with progress overlay
    Deleting,
}

/// Application state
pub struct AppState {
    /// List controller; owns the records, selection and background work
    pub controller: Controller,
    /// Row under the cursor, relative to the current page
    pub cursor: usize,
    /// Scroll offset for the table
    pub scroll_offset: usize,
    /// Visible area height (set by UI)
    pub visible_height: usize,
    /// Whether app should quit
    pub should_quit: bool,
    /// Spinner frame for animation
    pub spinner_frame: usize,
    /// Filter prompt buffers while editing
    pub filter_input: Option<FilterInput>,
    show_help: bool,
    notice: Option<(Notice, Instant)>,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20,
            should_quit: false,
            spinner_frame: 0,
            filter_input: None,
            show_help: false,
            notice: None,
        }
    }

    /// Current mode; delete dialogs follow the controller's delete phase
    pub fn mode(&self) -> AppMode {
        match self.controller.state().delete_phase() {
            DeletePhase::Confirming { .. } => AppMode::ConfirmDelete,
            DeletePhase::Deleting { .. } => AppMode::Deleting,
            DeletePhase::Idle if self.filter_input.is_some() => AppMode::EditFilter,
            DeletePhase::Idle if self.show_help => AppMode::Help,
            DeletePhase::Idle => AppMode::Browsing,
        }
    }

    /// Apply background results and pick up new notices
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    fn poll_at(&mut self, now: Instant) {
        if self.controller.pump() {
            self.clamp_cursor();
        }
        if let Some(notice) = most_severe(self.controller.take_notices()) {
            self.notice = Some((notice, now));
        }
        if self
            .notice
            .as_ref()
            .is_some_and(|(_, shown)| now.duration_since(*shown) >= NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    /// Advance spinner animation
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().map(|(notice, _)| notice)
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now()));
    }

    pub fn rows(&self) -> &[Person] {
        self.controller.state().rows()
    }

    pub fn current_row(&self) -> Option<&Person> {
        self.rows().get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
        self.ensure_visible();
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    fn ensure_visible(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor - height + 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows().len() {
            self.cursor += 1;
        }
        self.ensure_visible();
    }

    pub fn go_to_first(&mut self) {
        self.cursor = 0;
        self.ensure_visible();
    }

    pub fn go_to_last(&mut self) {
        self.cursor = self.rows().len().saturating_sub(1);
        self.ensure_visible();
    }

    pub fn toggle_row(&mut self) {
        if let Some(id) = self.current_row().map(|p| p.id) {
            self.controller.toggle_one(id);
        }
    }

    /// Flip the page checkbox: check all unless every row already is
    pub fn toggle_all(&mut self) {
        let checked = !self.controller.state().all_checked();
        self.controller.toggle_all(checked);
    }

    pub fn next_page(&mut self) {
        if self.controller.state().can_go_next() {
            self.controller.next_page();
            self.reset_cursor();
        }
    }

    pub fn prev_page(&mut self) {
        if self.controller.state().can_go_previous() {
            self.controller.previous_page();
            self.reset_cursor();
        }
    }

    pub fn sort_by(&mut self, field: OrderField) {
        self.controller.sort_by(field);
        self.reset_cursor();
    }

    pub fn refresh(&mut self) {
        self.controller.refresh();
    }

    pub fn open_filter(&mut self) {
        self.filter_input = Some(FilterInput::from_filter(self.controller.state().filter()));
    }

    pub fn filter_input_mut(&mut self) -> Option<&mut FilterInput> {
        self.filter_input.as_mut()
    }

    /// Apply the prompt; a bad date keeps the prompt open
    pub fn apply_filter(&mut self) {
        let Some(input) = &self.filter_input else {
            return;
        };
        match input.parse() {
            Ok(filter) => {
                self.filter_input = None;
                self.controller.set_filter(filter);
                self.reset_cursor();
            }
            Err(message) => self.show_notice(Notice::error(message)),
        }
    }

    pub fn cancel_filter(&mut self) {
        self.filter_input = None;
    }

    pub fn request_delete(&mut self) {
        if self.controller.state().selection().is_empty() {
            self.show_notice(Notice::info("Nothing selected"));
            return;
        }
        self.controller.request_delete();
    }

    pub fn confirm_delete(&mut self) {
        self.controller.confirm_delete();
    }

    pub fn cancel_delete(&mut self) {
        self.controller.cancel_delete();
    }

    pub fn run_stats(&mut self) {
        self.controller.request_stats();
    }

    pub fn dismiss_stats(&mut self) {
        self.controller.dismiss_stats();
    }

    pub fn show_help(&mut self) {
        self.show_help = true;
    }

    pub fn hide_help(&mut self) {
        self.show_help = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
