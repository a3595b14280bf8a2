use serde::Deserialize;

use crate::model::{Cursor, Page, Person, StatsSummary, TaskId, TaskStatus};
use crate::{FolksError, Result};

/// `GET /persons/` response body
#[derive(Debug, Deserialize)]
pub(crate) struct ListBody {
    #[serde(default)]
    pub results: Vec<Person>,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl From<ListBody> for Page {
    fn from(body: ListBody) -> Self {
        Page {
            items: body.results,
            next: body.next.filter(|s| !s.is_empty()).map(Cursor),
            previous: body.previous.filter(|s| !s.is_empty()).map(Cursor),
            total_count: body.count,
        }
    }
}

/// `POST /persons/calculate-stats/` response body
#[derive(Debug, Deserialize)]
pub(crate) struct TaskStarted {
    pub task_id: TaskId,
}

/// `GET /long-task/{id}/` response body
#[derive(Debug, Deserialize)]
pub(crate) struct TaskStatusBody {
    pub status: String,
    pub result: Option<StatsSummary>,
}

impl TaskStatusBody {
    /// Anything other than SUCCESS or FAILURE (PENDING, STARTED, RETRY...)
    /// means the task is still running.
    pub fn into_status(self) -> Result<TaskStatus> {
        match self.status.as_str() {
            "SUCCESS" => self.result.map(TaskStatus::Succeeded).ok_or_else(|| {
                FolksError::Decode("task reported SUCCESS without a result".to_string())
            }),
            "FAILURE" => Ok(TaskStatus::Failed),
            _ => Ok(TaskStatus::Pending),
        }
    }
}
