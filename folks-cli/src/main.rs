mod app;
mod config;
mod logging;
mod tui;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folks_core::job::JobUpdate;
use folks_core::{
    CancellationToken, Controller, DeletePhase, HttpApi, ListConfig, PersonApi, PersonDraft,
    PersonId, PollPolicy, run_stats_job,
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use tracing::info;

use app::{Action, AppMode, AppState};
use config::Config;
use tui::{AppEvent, EventHandler, handle_key};
use ui::{
    AppLayout, ConfirmDeleteView, DeleteProgressView, FilterPrompt, Footer, Header, HelpView,
    NoticeLine, PersonTable, StatsBanner, Theme,
};

/// FOLKS - browse, filter and bulk-manage person records
#[derive(Parser, Debug)]
#[command(name = "folks")]
#[command(about = "Browse, filter and bulk-manage person records from the terminal")]
#[command(version)]
struct Args {
    /// API root, e.g. http://127.0.0.1:8000/api/
    #[arg(long)]
    base_url: Option<String>,

    /// Config file (defaults to <config dir>/folks/folks.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay before the first stats status query, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log filter such as "debug" or "folks_core=trace"; overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the statistics report and print it
    Stats,
    /// Create a person record
    Add(PersonArgs),
    /// Update the fields of an existing person record
    Edit {
        id: u64,
        #[command(flatten)]
        person: PersonArgs,
    },
}

#[derive(clap::Args, Debug)]
struct PersonArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    age: u32,

    /// Comma-separated, e.g. "chess, hiking"
    #[arg(long, default_value = "")]
    hobbies: String,
}

impl PersonArgs {
    fn draft(&self) -> PersonDraft {
        PersonDraft::new(self.name.clone(), self.age, &self.hobbies)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _log_guard = logging::init_logging(args.log_level.as_deref());

    let mut config = Config::load(args.config.as_deref());
    if let Some(base_url) = &args.base_url {
        config.server.base_url = base_url.clone();
    }
    if let Some(interval_ms) = args.poll_interval_ms {
        config.polling.interval_ms = interval_ms;
    }

    let api = HttpApi::new(&config.client_config())?;
    info!(base_url = %api.base_url(), "folks starting");

    match args.command {
        Some(Command::Stats) => print_stats(&api, config.poll_policy()),
        Some(Command::Add(person)) => {
            let created = api.create_person(&person.draft())?;
            println!("Created #{} {}", created.id, created.name);
            Ok(())
        }
        Some(Command::Edit { id, person }) => {
            let updated = api.update_person(PersonId(id), &person.draft())?;
            println!("Updated #{} {}", updated.id, updated.name);
            Ok(())
        }
        None => run_tui(api, config.list_config()),
    }
}

/// Submit the stats task and block until it finishes
fn print_stats(api: &HttpApi, policy: PollPolicy) -> Result<()> {
    let outcome = run_stats_job(api, &policy, &CancellationToken::new(), |update| {
        match update {
            JobUpdate::Submitted(task) => eprintln!("Submitted task {}", task),
            JobUpdate::Polled { attempt } => eprintln!("Waiting for report (poll {})", attempt),
            JobUpdate::Finished(_) => {}
        }
    });
    let summary = outcome.into_result()?;

    println!("Mean age:  {:.2}", summary.mean_age);
    println!("Std dev:   {:.2}", summary.stddev_age);
    println!("Total:     {}", summary.total);
    Ok(())
}

fn run_tui(api: HttpApi, list_config: ListConfig) -> Result<()> {
    let controller = Controller::new(Arc::new(api), list_config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, AppState::new(controller));

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(Duration::from_millis(50));

    loop {
        // Apply fetch, delete and job results
        state.poll();

        terminal.draw(|frame| draw(frame, &mut state, &theme))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode());
                handle_action(&mut state, action);
            }
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => state.tick_spinner(),
        }

        if state.should_quit {
            break;
        }
    }

    info!("folks exiting");
    Ok(())
}

fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    let show_banner = StatsBanner::is_visible(state.controller.state().job());
    let layout = AppLayout::new(area, show_banner);

    // Table height minus the column titles
    state.visible_height = layout.table.height.saturating_sub(1) as usize;

    let mode = state.mode();
    let list = state.controller.state();
    let buf = frame.buffer_mut();

    buf.set_style(area, Style::default().bg(theme.bg));

    Header::new(list, state.spinner_frame, theme).render(layout.header, buf);
    if show_banner {
        StatsBanner::new(list.job(), state.spinner_frame, theme).render(layout.banner, buf);
    }
    PersonTable::new(list, state.cursor, state.scroll_offset, theme).render(layout.table, buf);
    NoticeLine::new(state.notice(), theme).render(layout.notice, buf);
    Footer::new(mode, list, theme).render(layout.footer, buf);

    match mode {
        AppMode::Browsing => {}
        AppMode::Help => HelpView::new(theme).render(area, buf),
        AppMode::EditFilter => {
            if let Some(input) = &state.filter_input {
                FilterPrompt::new(input, theme).render(area, buf);
            }
        }
        AppMode::ConfirmDelete => ConfirmDeleteView::new(list, theme).render(area, buf),
        AppMode::Deleting => {
            if let DeletePhase::Deleting { completed, total } = list.delete_phase() {
                DeleteProgressView::new(completed, total, state.spinner_frame, theme)
                    .render(area, buf);
            }
        }
    }
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::ToggleRow => state.toggle_row(),
        Action::ToggleAll => state.toggle_all(),
        Action::NextPage => state.next_page(),
        Action::PrevPage => state.prev_page(),
        Action::SortBy(field) => state.sort_by(field),
        Action::Refresh => state.refresh(),
        Action::EditFilter => state.open_filter(),
        Action::FilterInput(c) => {
            if let Some(input) = state.filter_input_mut() {
                input.push(c);
            }
        }
        Action::FilterBackspace => {
            if let Some(input) = state.filter_input_mut() {
                input.backspace();
            }
        }
        Action::FilterSwitchField => {
            if let Some(input) = state.filter_input_mut() {
                input.switch_field();
            }
        }
        Action::FilterClearField => {
            if let Some(input) = state.filter_input_mut() {
                input.clear_field();
            }
        }
        Action::ApplyFilter => state.apply_filter(),
        Action::CancelFilter => state.cancel_filter(),
        Action::Delete => state.request_delete(),
        Action::ConfirmDelete => state.confirm_delete(),
        Action::CancelDelete => state.cancel_delete(),
        Action::RunStats => state.run_stats(),
        Action::DismissStats => state.dismiss_stats(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.hide_help(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
