//! List controller: pure state transitions plus a threaded runtime.

mod runtime;
mod state;

pub use runtime::Controller;
pub use state::{Effect, Event, ListConfig, ListState, Notice, NoticeLevel};
