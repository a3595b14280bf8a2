mod action;
mod filter_input;
mod state;

pub use action::Action;
pub use filter_input::{FilterField, FilterInput};
pub use state::{AppMode, AppState};
