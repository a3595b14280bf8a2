use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, unbounded};
use tracing::{debug, info};

use super::state::{Effect, Event, ListConfig, ListState, Notice};
use crate::api::PersonApi;
use crate::delete::{BulkDeleter, DeleteMessage};
use crate::fetch::{FetchMessage, PageFetcher};
use crate::job::{JobHandle, JobMessage, JobPoller};
use crate::model::PersonId;
use crate::query::{FilterSpec, OrderField};

/// Drives a [`ListState`]: runs its effects on worker threads and feeds the
/// results back in on [`Controller::pump`].
///
/// Meant to be pumped from a UI tick loop; nothing here blocks.
pub struct Controller {
    state: ListState,
    fetcher: PageFetcher,
    deleter: BulkDeleter,
    poller: JobPoller,
    fetch_rx: Receiver<FetchMessage>,
    delete_rx: Receiver<DeleteMessage>,
    job_rx: Receiver<JobMessage>,
    jobs: Vec<JobHandle>,
    workers: Vec<JoinHandle<()>>,
    /// Pending loading-settle timers as (generation, due)
    timers: Vec<(u64, Instant)>,
}

impl Controller {
    /// Build the controller and start loading page 1
    pub fn new(api: Arc<dyn PersonApi>, config: ListConfig) -> Self {
        let (fetch_tx, fetch_rx) = unbounded();
        let (delete_tx, delete_rx) = unbounded();
        let (job_tx, job_rx) = unbounded();
        let (state, effects) = ListState::new(config);

        let mut controller = Self {
            state,
            fetcher: PageFetcher::new(Arc::clone(&api), fetch_tx),
            deleter: BulkDeleter::new(Arc::clone(&api), delete_tx),
            poller: JobPoller::new(api, job_tx),
            fetch_rx,
            delete_rx,
            job_rx,
            jobs: Vec::new(),
            workers: Vec::new(),
            timers: Vec::new(),
        };
        controller.run_all(effects);
        controller
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn dispatch(&mut self, event: Event) {
        let effects = self.state.reduce(event);
        self.run_all(effects);
    }

    pub fn refresh(&mut self) {
        self.dispatch(Event::Refresh);
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.dispatch(Event::SetFilter(filter));
    }

    pub fn sort_by(&mut self, field: OrderField) {
        self.dispatch(Event::SortBy(field));
    }

    pub fn next_page(&mut self) {
        self.dispatch(Event::NextPage);
    }

    pub fn previous_page(&mut self) {
        self.dispatch(Event::PreviousPage);
    }

    pub fn toggle_all(&mut self, checked: bool) {
        self.dispatch(Event::ToggleAll(checked));
    }

    pub fn toggle_one(&mut self, id: PersonId) {
        self.dispatch(Event::ToggleOne(id));
    }

    pub fn request_delete(&mut self) {
        self.dispatch(Event::RequestDelete);
    }

    pub fn cancel_delete(&mut self) {
        self.dispatch(Event::CancelDelete);
    }

    pub fn confirm_delete(&mut self) {
        self.dispatch(Event::ConfirmDelete);
    }

    pub fn request_stats(&mut self) {
        self.dispatch(Event::RequestStats);
    }

    pub fn dismiss_stats(&mut self) {
        self.dispatch(Event::DismissStats);
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    fn run_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch {
                generation,
                request,
            } => {
                debug!(generation, ?request, "issuing fetch");
                let handle = self.fetcher.fetch(generation, request);
                self.workers.push(handle);
            }
            Effect::SettleLoading { generation, after } => {
                self.timers.push((generation, Instant::now() + after));
            }
            Effect::DeleteSequence { ids, policy } => {
                info!(count = ids.len(), ?policy, "starting bulk delete");
                let handle = self.deleter.spawn(ids, policy);
                self.workers.push(handle);
            }
            Effect::StartJob { job, policy } => {
                info!(job = job.0, "starting stats job");
                let handle = self.poller.spawn(job, policy);
                self.jobs.push(handle);
            }
            Effect::CancelJob { job } => {
                for handle in self.jobs.iter().filter(|h| h.job == job) {
                    debug!(job = job.0, "cancelling stats job");
                    handle.cancel();
                }
            }
        }
    }

    /// Apply finished work and due timers. Returns whether anything changed.
    pub fn pump(&mut self) -> bool {
        self.pump_at(Instant::now())
    }

    pub fn pump_at(&mut self, now: Instant) -> bool {
        let mut events = Vec::new();

        while let Ok(message) = self.fetch_rx.try_recv() {
            events.push(match message.result {
                Ok(page) => Event::PageLoaded {
                    generation: message.generation,
                    page,
                },
                Err(error) => Event::PageFailed {
                    generation: message.generation,
                    error,
                },
            });
        }

        while let Ok(message) = self.delete_rx.try_recv() {
            events.push(match message {
                DeleteMessage::Progress { completed, total } => {
                    Event::DeleteProgress { completed, total }
                }
                DeleteMessage::Finished(report) => Event::DeleteFinished(report),
            });
        }

        while let Ok(message) = self.job_rx.try_recv() {
            events.push(Event::Job(message));
        }

        let (due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(_, at)| *at <= now);
        self.timers = pending;
        events.extend(
            due.into_iter()
                .map(|(generation, _)| Event::LoadingSettled { generation }),
        );

        self.jobs.retain(|h| !h.is_finished());
        self.workers.retain(|h| !h.is_finished());

        let changed = !events.is_empty();
        for event in events {
            self.dispatch(event);
        }
        changed
    }

    /// Number of job threads still alive as of the last pump
    pub fn running_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// True while any fetch, delete, job or timer is outstanding
    pub fn is_busy(&self) -> bool {
        !self.workers.is_empty()
            || !self.jobs.is_empty()
            || !self.timers.is_empty()
            || !self.fetch_rx.is_empty()
            || !self.delete_rx.is_empty()
            || !self.job_rx.is_empty()
    }

    /// Pump until `done` holds or the timeout passes. For headless callers.
    pub fn wait_until(
        &mut self,
        timeout: Duration,
        mut done: impl FnMut(&ListState) -> bool,
    ) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump();
            if done(&self.state) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        for handle in &self.jobs {
            handle.cancel();
        }
    }
}
