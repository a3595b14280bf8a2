use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::FolksError;
use crate::delete::{DeletePhase, DeletePolicy, DeleteReport};
use crate::fetch::PageRequest;
use crate::job::{JobId, JobMessage, JobOutcome, JobState, JobUpdate, PollPolicy};
use crate::model::{Page, Person, PersonId, StatsSummary};
use crate::query::{FilterSpec, OrderField, OrderSpec, QueryParams};
use crate::selection::Selection;

/// Behavior knobs for the list
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// How long the loading flag lingers after a fetch resolves
    pub settle_delay: Duration,
    pub delete_policy: DeletePolicy,
    /// Keep failed and skipped ids selected after a bulk delete
    pub retain_failed_selection: bool,
    pub poll_policy: PollPolicy,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            delete_policy: DeletePolicy::FailFast,
            retain_failed_selection: false,
            poll_policy: PollPolicy::default(),
        }
    }
}

/// Ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything that can happen to the list: operator input and worker results
#[derive(Debug, Clone)]
pub enum Event {
    /// External refresh signal, e.g. after a record was saved elsewhere.
    /// Also clears the selection.
    Refresh,
    SetFilter(FilterSpec),
    SortBy(OrderField),
    NextPage,
    PreviousPage,
    ToggleAll(bool),
    ToggleOne(PersonId),
    ClearSelection,
    RequestDelete,
    CancelDelete,
    ConfirmDelete,
    RequestStats,
    DismissStats,
    PageLoaded { generation: u64, page: Page },
    PageFailed { generation: u64, error: FolksError },
    LoadingSettled { generation: u64 },
    DeleteProgress { completed: usize, total: usize },
    DeleteFinished(DeleteReport),
    Job(JobMessage),
}

/// Side effects the runtime must carry out after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch {
        generation: u64,
        request: PageRequest,
    },
    /// Deliver `LoadingSettled { generation }` after `after`
    SettleLoading { generation: u64, after: Duration },
    DeleteSequence {
        ids: Vec<PersonId>,
        policy: DeletePolicy,
    },
    StartJob { job: JobId, policy: PollPolicy },
    CancelJob { job: JobId },
}

/// The list view model and its transitions.
///
/// All mutation goes through [`ListState::reduce`]; nothing here performs I/O.
#[derive(Debug, Clone)]
pub struct ListState {
    config: ListConfig,
    params: QueryParams,
    page: Option<Page>,
    selection: Selection,
    loading: bool,
    /// Generation of the latest fetch; older responses are dropped
    generation: u64,
    in_flight: bool,
    refresh_count: u64,
    delete: DeletePhase,
    job: JobState,
    active_job: Option<JobId>,
    next_job: u64,
    notices: VecDeque<Notice>,
}

impl ListState {
    /// Fresh state plus the effects that load page 1
    pub fn new(config: ListConfig) -> (Self, Vec<Effect>) {
        let mut state = Self {
            config,
            params: QueryParams::default(),
            page: None,
            selection: Selection::new(),
            loading: false,
            generation: 0,
            in_flight: false,
            refresh_count: 0,
            delete: DeletePhase::Idle,
            job: JobState::Idle,
            active_job: None,
            next_job: 0,
            notices: VecDeque::new(),
        };
        let effects = state.refresh();
        (state, effects)
    }

    pub fn reduce(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Refresh => {
                self.refresh_count += 1;
                self.selection = Selection::new();
                self.refresh()
            }
            Event::SetFilter(filter) => {
                self.params = self.params.with_filter(filter);
                self.refresh()
            }
            Event::SortBy(field) => {
                self.params = self.params.with_order(field);
                self.refresh()
            }
            Event::NextPage => match self.page.as_ref().and_then(|p| p.next.clone()) {
                Some(cursor) if self.can_go_next() => self.fetch(PageRequest::Cursor(cursor)),
                _ => Vec::new(),
            },
            Event::PreviousPage => match self.page.as_ref().and_then(|p| p.previous.clone()) {
                Some(cursor) if self.can_go_previous() => {
                    self.fetch(PageRequest::Cursor(cursor))
                }
                _ => Vec::new(),
            },
            Event::ToggleAll(checked) => {
                if !self.loading {
                    self.selection = self.selection.toggled_all(&self.page_ids(), checked);
                }
                Vec::new()
            }
            Event::ToggleOne(id) => {
                self.selection = self.selection.toggled(id);
                Vec::new()
            }
            Event::ClearSelection => {
                self.selection = Selection::new();
                Vec::new()
            }
            Event::RequestDelete => {
                if self.delete == DeletePhase::Idle && !self.selection.is_empty() {
                    self.delete = DeletePhase::Confirming {
                        count: self.selection.len(),
                    };
                }
                Vec::new()
            }
            Event::CancelDelete => {
                if matches!(self.delete, DeletePhase::Confirming { .. }) {
                    self.delete = DeletePhase::Idle;
                }
                Vec::new()
            }
            Event::ConfirmDelete => self.start_delete(),
            Event::RequestStats => self.start_job(),
            Event::DismissStats => self.stop_job(),
            Event::PageLoaded { generation, page } => {
                if !self.is_current(generation) {
                    return Vec::new();
                }
                self.page = Some(page);
                self.in_flight = false;
                self.settle()
            }
            Event::PageFailed { generation, error } => {
                if !self.is_current(generation) {
                    return Vec::new();
                }
                // The previous page stays on screen
                self.in_flight = false;
                self.notify(Notice::error(format!("Connection error: {}", error)));
                self.settle()
            }
            Event::LoadingSettled { generation } => {
                if generation == self.generation && !self.in_flight {
                    self.loading = false;
                }
                Vec::new()
            }
            Event::DeleteProgress { completed, total } => {
                if let DeletePhase::Deleting { .. } = self.delete {
                    self.delete = DeletePhase::Deleting { completed, total };
                }
                Vec::new()
            }
            Event::DeleteFinished(report) => self.finish_delete(report),
            Event::Job(message) => {
                self.on_job(message);
                Vec::new()
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation == self.generation {
            true
        } else {
            debug!(generation, latest = self.generation, "discarding stale page response");
            false
        }
    }

    /// Restart from page 1 with the current parameters. Stored cursors and
    /// any job result are discarded.
    fn refresh(&mut self) -> Vec<Effect> {
        let mut effects = self.stop_job();
        self.page = self.page.as_ref().map(Page::without_cursors);
        effects.extend(self.fetch(PageRequest::First(self.params)));
        effects
    }

    fn fetch(&mut self, request: PageRequest) -> Vec<Effect> {
        self.generation += 1;
        self.loading = true;
        self.in_flight = true;
        vec![Effect::Fetch {
            generation: self.generation,
            request,
        }]
    }

    fn settle(&mut self) -> Vec<Effect> {
        if self.config.settle_delay.is_zero() {
            self.loading = false;
            Vec::new()
        } else {
            vec![Effect::SettleLoading {
                generation: self.generation,
                after: self.config.settle_delay,
            }]
        }
    }

    fn start_delete(&mut self) -> Vec<Effect> {
        let DeletePhase::Confirming { .. } = self.delete else {
            return Vec::new();
        };
        let ids = self.selection.ids().to_vec();
        info!(count = ids.len(), "bulk delete confirmed");
        self.delete = DeletePhase::Deleting {
            completed: 0,
            total: ids.len(),
        };
        vec![Effect::DeleteSequence {
            ids,
            policy: self.config.delete_policy,
        }]
    }

    fn finish_delete(&mut self, report: DeleteReport) -> Vec<Effect> {
        self.delete = DeletePhase::Idle;
        self.selection = if self.config.retain_failed_selection {
            self.selection.retained(&report.remaining_ids())
        } else {
            Selection::new()
        };

        let notice = match (report.error(), report.first_failure()) {
            (Some(error), Some((id, reason))) => {
                Notice::error(format!("{}; #{} failed: {}", error, id, reason))
            }
            (Some(error), None) => Notice::error(error.to_string()),
            (None, _) => {
                let deleted = report.total();
                Notice::success(format!(
                    "Deleted {} item{}",
                    deleted,
                    if deleted == 1 { "" } else { "s" }
                ))
            }
        };
        self.notify(notice);
        self.refresh()
    }

    fn start_job(&mut self) -> Vec<Effect> {
        let mut effects = self.stop_job();
        self.next_job += 1;
        let job = JobId(self.next_job);
        self.active_job = Some(job);
        self.job = JobState::Submitting;
        effects.push(Effect::StartJob {
            job,
            policy: self.config.poll_policy,
        });
        effects
    }

    /// Cancel any running job and clear its result
    fn stop_job(&mut self) -> Vec<Effect> {
        self.job = JobState::Idle;
        match self.active_job.take() {
            Some(job) => vec![Effect::CancelJob { job }],
            None => Vec::new(),
        }
    }

    fn on_job(&mut self, message: JobMessage) {
        if self.active_job != Some(message.job) {
            debug!(job = message.job.0, "discarding update from superseded job");
            return;
        }
        match message.update {
            JobUpdate::Submitted(task) => {
                self.job = JobState::Polling { task, attempts: 0 };
            }
            JobUpdate::Polled { attempt } => {
                if let JobState::Polling { attempts, .. } = &mut self.job {
                    *attempts = attempt;
                }
            }
            JobUpdate::Finished(outcome) => {
                self.active_job = None;
                self.job = match outcome {
                    JobOutcome::Succeeded(summary) => {
                        self.notify(Notice::success("Report generated"));
                        JobState::Succeeded(summary)
                    }
                    JobOutcome::Failed => {
                        self.notify(Notice::error("Stats task failed"));
                        JobState::Failed
                    }
                    JobOutcome::Cancelled => JobState::Idle,
                    other => {
                        let error = other
                            .into_result()
                            .err()
                            .unwrap_or(FolksError::JobFailed);
                        self.notify(Notice::error(format!("Stats unavailable: {}", error)));
                        JobState::Errored(error)
                    }
                };
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    fn page_ids(&self) -> Vec<PersonId> {
        self.page.as_ref().map(Page::ids).unwrap_or_default()
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.params.filter
    }

    pub fn order(&self) -> &OrderSpec {
        &self.params.order
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn rows(&self) -> &[Person] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn total_count(&self) -> u64 {
        self.page.as_ref().map(|p| p.total_count).unwrap_or(0)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_go_next(&self) -> bool {
        !self.loading && !self.in_flight && self.page.as_ref().is_some_and(Page::has_next)
    }

    pub fn can_go_previous(&self) -> bool {
        !self.loading && !self.in_flight && self.page.as_ref().is_some_and(Page::has_previous)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, id: PersonId) -> bool {
        self.selection.contains(id)
    }

    /// State of the "select all" checkbox
    pub fn all_checked(&self) -> bool {
        self.selection.covers_exactly(&self.page_ids())
    }

    pub fn delete_phase(&self) -> DeletePhase {
        self.delete
    }

    pub fn job(&self) -> &JobState {
        &self.job
    }

    pub fn stats(&self) -> Option<&StatsSummary> {
        self.job.result()
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::delete::DeleteOutcome;
    use crate::model::{Cursor, TaskId};
    use crate::query::Direction;
    use crate::testing::{page, summary};

    fn fresh() -> ListState {
        ListState::new(ListConfig::default()).0
    }

    fn generation_of(effects: &[Effect]) -> u64 {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch { generation, .. } => Some(*generation),
                _ => None,
            })
            .expect("no fetch effect")
    }

    fn loaded(state: &mut ListState, p: Page) {
        let generation = state.generation();
        state.reduce(Event::PageLoaded { generation, page: p });
    }

    fn ids(raw: &[u64]) -> Vec<PersonId> {
        raw.iter().copied().map(PersonId).collect()
    }

    fn succeed_job(state: &mut ListState) -> JobId {
        let effects = state.reduce(Event::RequestStats);
        let job = effects
            .iter()
            .find_map(|e| match e {
                Effect::StartJob { job, .. } => Some(*job),
                _ => None,
            })
            .unwrap();
        state.reduce(Event::Job(JobMessage {
            job,
            update: JobUpdate::Finished(JobOutcome::Succeeded(summary(5))),
        }));
        job
    }

    #[test]
    fn test_construction_fetches_first_page() {
        let (state, effects) = ListState::new(ListConfig::default());
        assert_eq!(
            effects,
            vec![Effect::Fetch {
                generation: 1,
                request: PageRequest::First(QueryParams::default()),
            }]
        );
        assert!(state.is_loading());
        assert!(!state.can_go_next());
    }

    #[test]
    fn test_pagination_follows_cursors() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2], Some("next-1"), None));
        assert!(state.can_go_next());
        assert!(!state.can_go_previous());
        assert!(state.reduce(Event::PreviousPage).is_empty());

        let effects = state.reduce(Event::NextPage);
        assert_eq!(
            effects,
            vec![Effect::Fetch {
                generation: 2,
                request: PageRequest::Cursor(Cursor("next-1".to_string())),
            }]
        );
        // Already in flight
        assert!(state.reduce(Event::NextPage).is_empty());

        loaded(&mut state, page(&[3], None, Some("prev-2")));
        assert!(!state.can_go_next());
        assert!(state.can_go_previous());
    }

    #[test]
    fn test_filter_change_resets_pagination() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2], Some("next"), Some("prev")));

        let filter = FilterSpec::new(NaiveDate::from_ymd_opt(2024, 6, 1), None);
        let effects = state.reduce(Event::SetFilter(filter));

        assert_eq!(
            effects,
            vec![Effect::Fetch {
                generation: 2,
                request: PageRequest::First(QueryParams::default().with_filter(filter)),
            }]
        );
        let shown = state.page().unwrap();
        assert_eq!(shown.items.len(), 2);
        assert!(shown.next.is_none() && shown.previous.is_none());
    }

    #[test]
    fn test_sort_toggles_and_refetches() {
        let mut state = fresh();
        loaded(&mut state, page(&[1], None, None));

        state.reduce(Event::SortBy(OrderField::Age));
        assert_eq!(
            *state.order(),
            OrderSpec::new(OrderField::Age, Direction::Ascending)
        );
        let effects = state.reduce(Event::SortBy(OrderField::Age));
        assert_eq!(
            *state.order(),
            OrderSpec::new(OrderField::Age, Direction::Descending)
        );
        assert_eq!(generation_of(&effects), 3);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = fresh();
        let first = state.generation();
        state.reduce(Event::SortBy(OrderField::Name));
        let second = state.generation();

        state.reduce(Event::PageLoaded {
            generation: first,
            page: page(&[9], None, None),
        });
        assert!(state.page().is_none());
        assert!(state.is_loading());

        state.reduce(Event::PageLoaded {
            generation: second,
            page: page(&[1], None, None),
        });
        assert_eq!(state.rows()[0].id, PersonId(1));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_fetch_failure_keeps_previous_page() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2], None, None));
        state.reduce(Event::Refresh);

        let generation = state.generation();
        state.reduce(Event::PageFailed {
            generation,
            error: FolksError::Network("refused".to_string()),
        });

        assert_eq!(state.rows().len(), 2);
        assert!(!state.is_loading());
        let notices = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_settle_delay_keeps_loading() {
        let config = ListConfig {
            settle_delay: Duration::from_millis(500),
            ..ListConfig::default()
        };
        let (mut state, _) = ListState::new(config);
        let generation = state.generation();

        let effects = state.reduce(Event::PageLoaded {
            generation,
            page: page(&[1], Some("n"), None),
        });
        assert_eq!(
            effects,
            vec![Effect::SettleLoading {
                generation,
                after: Duration::from_millis(500)
            }]
        );
        assert!(state.is_loading());
        assert!(!state.can_go_next());

        state.reduce(Event::LoadingSettled {
            generation: generation - 1,
        });
        assert!(state.is_loading());
        state.reduce(Event::LoadingSettled { generation });
        assert!(!state.is_loading());
        assert!(state.can_go_next());
    }

    #[test]
    fn test_selection_survives_pagination() {
        let mut state = fresh();
        loaded(&mut state, page(&[7, 8], Some("p2"), None));
        state.reduce(Event::ToggleOne(PersonId(7)));

        state.reduce(Event::NextPage);
        loaded(&mut state, page(&[9, 10], None, Some("p1")));
        assert!(state.is_selected(PersonId(7)));

        state.reduce(Event::PreviousPage);
        loaded(&mut state, page(&[7, 8], Some("p2"), None));
        assert!(state.is_selected(PersonId(7)));
        assert_eq!(state.selection().len(), 1);
    }

    #[test]
    fn test_select_all_is_exact_match() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2, 3], Some("p2"), None));

        state.reduce(Event::ToggleAll(true));
        assert!(state.all_checked());
        state.reduce(Event::ToggleOne(PersonId(2)));
        assert_eq!(state.selection().ids(), ids(&[1, 3]).as_slice());
        assert!(!state.all_checked());

        state.reduce(Event::ToggleOne(PersonId(2)));
        state.reduce(Event::ToggleOne(PersonId(42)));
        assert!(!state.all_checked());

        state.reduce(Event::ToggleAll(false));
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_external_refresh_clears_selection() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2], None, None));
        state.reduce(Event::ToggleOne(PersonId(1)));

        state.reduce(Event::SetFilter(FilterSpec::default()));
        assert!(state.is_selected(PersonId(1)));

        state.reduce(Event::Refresh);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_select_all_ignored_while_loading() {
        let mut state = fresh();
        state.reduce(Event::ToggleAll(true));
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_delete_requires_selection() {
        let mut state = fresh();
        state.reduce(Event::RequestDelete);
        assert_eq!(state.delete_phase(), DeletePhase::Idle);
        assert!(state.reduce(Event::ConfirmDelete).is_empty());
    }

    #[test]
    fn test_delete_confirm_and_cancel() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2], None, None));
        state.reduce(Event::ToggleOne(PersonId(2)));
        state.reduce(Event::ToggleOne(PersonId(1)));

        state.reduce(Event::RequestDelete);
        assert_eq!(state.delete_phase(), DeletePhase::Confirming { count: 2 });
        state.reduce(Event::CancelDelete);
        assert_eq!(state.delete_phase(), DeletePhase::Idle);

        state.reduce(Event::RequestDelete);
        let effects = state.reduce(Event::ConfirmDelete);
        assert_eq!(
            effects,
            vec![Effect::DeleteSequence {
                ids: ids(&[2, 1]),
                policy: DeletePolicy::FailFast,
            }]
        );
        assert_eq!(
            state.delete_phase(),
            DeletePhase::Deleting {
                completed: 0,
                total: 2
            }
        );
    }

    #[test]
    fn test_partial_delete_clears_selection_and_refreshes() {
        let mut state = fresh();
        loaded(&mut state, page(&[1, 2, 3], Some("n"), None));
        state.reduce(Event::ToggleAll(true));
        state.reduce(Event::RequestDelete);
        state.reduce(Event::ConfirmDelete);
        succeed_job(&mut state);
        state.take_notices();

        let report = DeleteReport {
            outcomes: vec![
                (PersonId(1), DeleteOutcome::Deleted),
                (PersonId(2), DeleteOutcome::Failed("500".to_string())),
                (PersonId(3), DeleteOutcome::Skipped),
            ],
        };
        let effects = state.reduce(Event::DeleteFinished(report));

        assert!(state.selection().is_empty());
        assert_eq!(state.delete_phase(), DeletePhase::Idle);
        assert_eq!(*state.job(), JobState::Idle);
        assert!(effects.contains(&Effect::Fetch {
            generation: state.generation(),
            request: PageRequest::First(QueryParams::default()),
        }));
        let notices = state.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(
            notices[0].message,
            "Deleted 1 of 3 records before an error; #2 failed: 500"
        );
    }

    #[test]
    fn test_retain_failed_selection() {
        let config = ListConfig {
            retain_failed_selection: true,
            ..ListConfig::default()
        };
        let (mut state, _) = ListState::new(config);
        loaded(&mut state, page(&[1, 2, 3], None, None));
        state.reduce(Event::ToggleAll(true));
        state.reduce(Event::RequestDelete);
        state.reduce(Event::ConfirmDelete);

        state.reduce(Event::DeleteFinished(DeleteReport {
            outcomes: vec![
                (PersonId(1), DeleteOutcome::Deleted),
                (PersonId(2), DeleteOutcome::Failed("gone".to_string())),
                (PersonId(3), DeleteOutcome::Skipped),
            ],
        }));

        assert_eq!(state.selection().ids(), ids(&[2, 3]).as_slice());
    }

    #[test]
    fn test_refresh_clears_job_result() {
        let mut state = fresh();
        loaded(&mut state, page(&[1], None, None));

        succeed_job(&mut state);
        assert_eq!(state.stats(), Some(&summary(5)));
        state.reduce(Event::Refresh);
        assert_eq!(state.stats(), None);
        assert_eq!(state.refresh_count(), 1);

        succeed_job(&mut state);
        state.reduce(Event::SetFilter(FilterSpec::default()));
        assert_eq!(state.stats(), None);

        succeed_job(&mut state);
        state.reduce(Event::SortBy(OrderField::Age));
        assert_eq!(state.stats(), None);
    }

    #[test]
    fn test_refresh_cancels_running_job() {
        let mut state = fresh();
        state.reduce(Event::RequestStats);
        let effects = state.reduce(Event::Refresh);
        assert_eq!(effects[0], Effect::CancelJob { job: JobId(1) });
        assert_eq!(*state.job(), JobState::Idle);
    }

    #[test]
    fn test_new_job_supersedes_old() {
        let mut state = fresh();
        state.reduce(Event::RequestStats);
        let effects = state.reduce(Event::RequestStats);
        assert_eq!(effects[0], Effect::CancelJob { job: JobId(1) });
        assert!(matches!(
            effects[1],
            Effect::StartJob { job: JobId(2), .. }
        ));

        // Late result from the first job is ignored
        state.reduce(Event::Job(JobMessage {
            job: JobId(1),
            update: JobUpdate::Finished(JobOutcome::Succeeded(summary(1))),
        }));
        assert_eq!(*state.job(), JobState::Submitting);
    }

    #[test]
    fn test_job_lifecycle() {
        let mut state = fresh();
        state.reduce(Event::RequestStats);
        let job = JobId(1);
        let task = TaskId("t".to_string());

        state.reduce(Event::Job(JobMessage {
            job,
            update: JobUpdate::Submitted(task.clone()),
        }));
        state.reduce(Event::Job(JobMessage {
            job,
            update: JobUpdate::Polled { attempt: 2 },
        }));
        assert_eq!(*state.job(), JobState::Polling { task, attempts: 2 });

        state.reduce(Event::Job(JobMessage {
            job,
            update: JobUpdate::Finished(JobOutcome::TransportError(FolksError::Network(
                "reset".to_string(),
            ))),
        }));
        assert!(matches!(
            state.job(),
            JobState::Errored(FolksError::JobTransport(_))
        ));
        assert_eq!(state.take_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_dismiss_stats() {
        let mut state = fresh();
        succeed_job(&mut state);
        assert!(state.reduce(Event::DismissStats).is_empty());
        assert_eq!(*state.job(), JobState::Idle);
    }
}
