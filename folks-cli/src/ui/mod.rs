mod bar_chart;
mod confirm_delete;
mod delete_progress;
mod filter_prompt;
mod footer;
mod header;
mod help;
mod layout;
mod notice_line;
mod person_table;
mod stats_banner;
mod theme;

pub use confirm_delete::ConfirmDeleteView;
pub use delete_progress::DeleteProgressView;
pub use filter_prompt::FilterPrompt;
pub use footer::Footer;
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use notice_line::NoticeLine;
pub use person_table::PersonTable;
pub use stats_banner::StatsBanner;
pub use theme::Theme;

/// Braille spinner characters
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

fn spinner(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}
