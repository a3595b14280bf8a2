pub mod api;
pub mod controller;
pub mod delete;
pub mod error;
pub mod fetch;
pub mod job;
pub mod model;
pub mod query;
pub mod selection;

#[cfg(test)]
mod testing;

pub use api::{ClientConfig, HttpApi, PersonApi};
pub use controller::{Controller, Event, ListConfig, ListState, Notice, NoticeLevel};
pub use delete::{DeleteOutcome, DeletePhase, DeletePolicy, DeleteReport};
pub use error::{FolksError, Result};
pub use fetch::PageRequest;
pub use job::{CancellationToken, JobOutcome, JobState, PollPolicy, run_stats_job};
pub use model::{Cursor, Page, Person, PersonDraft, PersonId, StatsSummary, TaskId, TaskStatus};
pub use query::{Direction, FilterSpec, OrderField, OrderSpec, QueryParams};
pub use selection::Selection;
