mod http;
mod wire;

pub use http::HttpApi;

use std::time::Duration;

use crate::Result;
use crate::fetch::PageRequest;
use crate::model::{Page, Person, PersonDraft, PersonId, TaskId, TaskStatus};

/// Remote collaborator the controller talks to.
///
/// Implementations are called from worker threads and must not hold any
/// controller state.
pub trait PersonApi: Send + Sync {
    /// Fetch one page, either fresh from filter/order or by cursor
    fn fetch_page(&self, request: &PageRequest) -> Result<Page>;

    fn delete_person(&self, id: PersonId) -> Result<()>;

    /// Kick off the statistics computation
    fn start_stats(&self) -> Result<TaskId>;

    fn task_status(&self, task: &TaskId) -> Result<TaskStatus>;

    fn create_person(&self, draft: &PersonDraft) -> Result<Person>;

    fn update_person(&self, id: PersonId, draft: &PersonDraft) -> Result<Person>;
}

/// Connection settings for [`HttpApi`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; endpoint paths are resolved relative to it
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
