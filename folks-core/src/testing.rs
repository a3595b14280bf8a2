//! Scripted [`PersonApi`] for tests.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

use chrono::{TimeZone, Utc};

use crate::api::PersonApi;
use crate::fetch::PageRequest;
use crate::model::{
    Cursor, Page, Person, PersonDraft, PersonId, StatsSummary, TaskId, TaskStatus,
};
use crate::{FolksError, Result};

#[derive(Default)]
struct Script {
    pages: VecDeque<Result<Page>>,
    page_requests: Vec<PageRequest>,
    failing_deletes: HashSet<PersonId>,
    delete_attempts: Vec<PersonId>,
    start_error: Option<FolksError>,
    starts: u32,
    statuses: VecDeque<Result<TaskStatus>>,
    status_queries: u32,
}

/// Replays queued responses. An empty page queue yields empty pages and an
/// empty status queue yields `Pending`.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn push_page(&self, page: Result<Page>) {
        self.script().pages.push_back(page);
    }

    pub fn fail_delete(&self, id: PersonId) {
        self.script().failing_deletes.insert(id);
    }

    pub fn fail_start(&self, error: FolksError) {
        self.script().start_error = Some(error);
    }

    pub fn push_status(&self, status: Result<TaskStatus>) {
        self.script().statuses.push_back(status);
    }

    pub fn page_requests(&self) -> Vec<PageRequest> {
        self.script().page_requests.clone()
    }

    pub fn delete_attempts(&self) -> Vec<PersonId> {
        self.script().delete_attempts.clone()
    }

    pub fn starts(&self) -> u32 {
        self.script().starts
    }

    pub fn status_queries(&self) -> u32 {
        self.script().status_queries
    }
}

impl PersonApi for ScriptedApi {
    fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let mut script = self.script();
        script.page_requests.push(request.clone());
        script.pages.pop_front().unwrap_or_else(|| Ok(Page::default()))
    }

    fn delete_person(&self, id: PersonId) -> Result<()> {
        let mut script = self.script();
        script.delete_attempts.push(id);
        if script.failing_deletes.contains(&id) {
            Err(FolksError::Status {
                status: 500,
                url: format!("persons/{}/", id),
            })
        } else {
            Ok(())
        }
    }

    fn start_stats(&self) -> Result<TaskId> {
        let mut script = self.script();
        script.starts += 1;
        match &script.start_error {
            Some(e) => Err(e.clone()),
            None => Ok(TaskId(format!("task-{}", script.starts))),
        }
    }

    fn task_status(&self, _task: &TaskId) -> Result<TaskStatus> {
        let mut script = self.script();
        script.status_queries += 1;
        script
            .statuses
            .pop_front()
            .unwrap_or(Ok(TaskStatus::Pending))
    }

    fn create_person(&self, draft: &PersonDraft) -> Result<Person> {
        Ok(person_from(PersonId(1), draft))
    }

    fn update_person(&self, id: PersonId, draft: &PersonDraft) -> Result<Person> {
        Ok(person_from(id, draft))
    }
}

fn person_from(id: PersonId, draft: &PersonDraft) -> Person {
    Person {
        id,
        name: draft.name.clone(),
        age: draft.age,
        hobbies: draft.hobbies.clone(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn person(id: u64) -> Person {
    person_from(
        PersonId(id),
        &PersonDraft::new(format!("Person {}", id), 20 + id as u32, "reading"),
    )
}

/// Page of generated persons with optional cursors
pub fn page(ids: &[u64], next: Option<&str>, previous: Option<&str>) -> Page {
    Page {
        items: ids.iter().map(|&id| person(id)).collect(),
        next: next.map(|c| Cursor(c.to_string())),
        previous: previous.map(|c| Cursor(c.to_string())),
        total_count: ids.len() as u64,
    }
}

pub fn summary(total: u64) -> StatsSummary {
    StatsSummary {
        mean_age: 30.0,
        stddev_age: 5.0,
        total,
    }
}
