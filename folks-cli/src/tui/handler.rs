use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folks_core::OrderField;

use crate::app::{Action, AppMode};

/// Map key events to actions based on current mode
pub fn handle_key(key: KeyEvent, mode: AppMode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match mode {
        AppMode::Browsing => handle_key_browsing(key),
        AppMode::Help => handle_key_help(key),
        AppMode::EditFilter => handle_key_filter(key),
        AppMode::ConfirmDelete => handle_key_confirm(key),
        AppMode::Deleting => handle_key_deleting(key),
    }
}

fn handle_key_help(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::HideHelp,
        _ => Action::Tick,
    }
}

fn handle_key_filter(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ApplyFilter,
        KeyCode::Esc => Action::CancelFilter,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            Action::FilterSwitchField
        }
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Delete => Action::FilterClearField,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::Tick,
    }
}

fn handle_key_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::CancelDelete,
        _ => Action::Tick,
    }
}

fn handle_key_deleting(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Tick,
    }
}

fn handle_key_browsing(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,

        // Rows
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Home | KeyCode::Char('g') => Action::GoToFirst,
        KeyCode::End | KeyCode::Char('G') => Action::GoToLast,

        // Selection
        KeyCode::Char(' ') => Action::ToggleRow,
        KeyCode::Char('a') => Action::ToggleAll,

        // Pages
        KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
        KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => Action::PrevPage,

        // Query
        KeyCode::Char('1') => Action::SortBy(OrderField::Name),
        KeyCode::Char('2') => Action::SortBy(OrderField::Age),
        KeyCode::Char('3') => Action::SortBy(OrderField::CreatedAt),
        KeyCode::Char('f') => Action::EditFilter,
        KeyCode::Char('r') => Action::Refresh,

        // Actions
        KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('s') => Action::RunStats,
        KeyCode::Char('x') => Action::DismissStats,

        KeyCode::Char('?') => Action::ShowHelp,

        _ => Action::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browsing_keys() {
        let mode = AppMode::Browsing;
        assert_eq!(handle_key(key(KeyCode::Char('j')), mode), Action::MoveDown);
        assert_eq!(handle_key(key(KeyCode::Char(' ')), mode), Action::ToggleRow);
        assert_eq!(handle_key(key(KeyCode::Char('n')), mode), Action::NextPage);
        assert_eq!(
            handle_key(key(KeyCode::Char('2')), mode),
            Action::SortBy(OrderField::Age)
        );
        assert_eq!(handle_key(key(KeyCode::Char('x')), mode), Action::DismissStats);
    }

    #[test]
    fn test_n_cancels_in_confirm_dialog() {
        assert_eq!(
            handle_key(key(KeyCode::Char('n')), AppMode::ConfirmDelete),
            Action::CancelDelete
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), AppMode::ConfirmDelete),
            Action::ConfirmDelete
        );
    }

    #[test]
    fn test_filter_prompt_captures_text() {
        let mode = AppMode::EditFilter;
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), mode),
            Action::FilterInput('q')
        );
        assert_eq!(handle_key(key(KeyCode::Tab), mode), Action::FilterSwitchField);
        assert_eq!(handle_key(key(KeyCode::Esc), mode), Action::CancelFilter);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            AppMode::Browsing,
            AppMode::Help,
            AppMode::EditFilter,
            AppMode::ConfirmDelete,
            AppMode::Deleting,
        ] {
            assert_eq!(handle_key(ctrl_c, mode), Action::Quit);
        }
    }
}
