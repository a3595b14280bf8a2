use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::api::PersonApi;
use crate::model::{StatsSummary, TaskId, TaskStatus};
use crate::{FolksError, Result};

/// Cancellation token for stopping a background job.
///
/// Cancelling also wakes a job that is waiting between polls.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        *Self::guard(lock) = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *Self::guard(&self.inner.0)
    }

    /// Sleep for `timeout` or until cancelled. Returns true if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = Self::guard(lock);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard
    }

    fn guard(lock: &Mutex<bool>) -> MutexGuard<'_, bool> {
        lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// How often, and for how long, to poll a task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    /// Delay before the first status query
    pub initial_interval: Duration,
    /// Multiplier applied to the delay after every pending poll
    pub backoff: f64,
    pub max_interval: Duration,
    /// Give up after this many status queries
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(1000),
            backoff: 1.5,
            max_interval: Duration::from_secs(10),
            max_attempts: 120,
        }
    }
}

impl PollPolicy {
    /// Constant cadence, no backoff
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            initial_interval: interval,
            backoff: 1.0,
            max_interval: interval,
            max_attempts,
        }
    }

    /// Delay before poll number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let cap = self.max_interval.max(self.initial_interval).as_nanos() as f64;
        let factor = self.backoff.max(1.0).powi(attempt.saturating_sub(1) as i32);
        let nanos = (self.initial_interval.as_nanos() as f64 * factor).min(cap);
        Duration::from_nanos(nanos.round() as u64)
    }
}

/// Local number distinguishing successive submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

/// How a job ended
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Succeeded(StatsSummary),
    /// The task ran and reported failure
    Failed,
    /// Starting the task failed
    SubmitFailed(FolksError),
    /// A status query failed; polling stopped
    TransportError(FolksError),
    TimedOut { attempts: u32 },
    Cancelled,
}

impl JobOutcome {
    pub fn into_result(self) -> Result<StatsSummary> {
        match self {
            JobOutcome::Succeeded(summary) => Ok(summary),
            JobOutcome::Failed => Err(FolksError::JobFailed),
            JobOutcome::SubmitFailed(e) => Err(e),
            JobOutcome::TransportError(e) => Err(FolksError::JobTransport(e.to_string())),
            JobOutcome::TimedOut { attempts } => Err(FolksError::JobTimedOut(attempts)),
            JobOutcome::Cancelled => Err(FolksError::Cancelled),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobUpdate {
    Submitted(TaskId),
    Polled { attempt: u32 },
    Finished(JobOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobMessage {
    pub job: JobId,
    pub update: JobUpdate,
}

/// Job state as shown to the operator
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Submitting,
    Polling { task: TaskId, attempts: u32 },
    Succeeded(StatsSummary),
    Failed,
    Errored(FolksError),
}

impl JobState {
    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Submitting | JobState::Polling { .. })
    }

    pub fn result(&self) -> Option<&StatsSummary> {
        match self {
            JobState::Succeeded(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Submit the stats task and poll it until it ends.
///
/// The token is checked before every status query and while waiting between
/// them. `report` sees every update, including the final one.
pub fn run_stats_job(
    api: &dyn PersonApi,
    policy: &PollPolicy,
    token: &CancellationToken,
    mut report: impl FnMut(JobUpdate),
) -> JobOutcome {
    let outcome = poll_stats_job(api, policy, token, &mut report);
    report(JobUpdate::Finished(outcome.clone()));
    outcome
}

fn poll_stats_job(
    api: &dyn PersonApi,
    policy: &PollPolicy,
    token: &CancellationToken,
    report: &mut impl FnMut(JobUpdate),
) -> JobOutcome {
    if token.is_cancelled() {
        return JobOutcome::Cancelled;
    }

    let task = match api.start_stats() {
        Ok(task) => task,
        Err(e) => {
            warn!(error = %e, "could not start stats task");
            return JobOutcome::SubmitFailed(e);
        }
    };
    info!(%task, "stats task submitted");
    report(JobUpdate::Submitted(task.clone()));

    for attempt in 1..=policy.max_attempts {
        if token.wait_timeout(policy.delay_for(attempt)) {
            debug!(%task, attempt, "stats polling cancelled");
            return JobOutcome::Cancelled;
        }

        match api.task_status(&task) {
            Ok(TaskStatus::Pending) => report(JobUpdate::Polled { attempt }),
            Ok(TaskStatus::Succeeded(summary)) => {
                info!(%task, attempt, "stats task succeeded");
                return JobOutcome::Succeeded(summary);
            }
            Ok(TaskStatus::Failed) => {
                warn!(%task, attempt, "stats task failed");
                return JobOutcome::Failed;
            }
            Err(e) => {
                warn!(%task, attempt, error = %e, "stats status query failed");
                return JobOutcome::TransportError(e);
            }
        }
    }

    warn!(%task, attempts = policy.max_attempts, "stats task timed out");
    JobOutcome::TimedOut {
        attempts: policy.max_attempts,
    }
}

/// A running job; cancelling is idempotent
#[derive(Debug)]
pub struct JobHandle {
    pub job: JobId,
    token: CancellationToken,
    thread: JoinHandle<()>,
}

impl JobHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    pub fn join(self) -> thread::Result<()> {
        self.thread.join()
    }
}

/// Spawns stats jobs on background threads
pub struct JobPoller {
    api: Arc<dyn PersonApi>,
    tx: Sender<JobMessage>,
}

impl JobPoller {
    pub fn new(api: Arc<dyn PersonApi>, tx: Sender<JobMessage>) -> Self {
        Self { api, tx }
    }

    pub fn spawn(&self, job: JobId, policy: PollPolicy) -> JobHandle {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = CancellationToken::new();
        let thread_token = token.clone();
        let thread = thread::spawn(move || {
            run_stats_job(api.as_ref(), &policy, &thread_token, |update| {
                let _ = tx.send(JobMessage { job, update });
            });
        });
        JobHandle { job, token, thread }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossbeam_channel::unbounded;

    use super::*;
    use crate::testing::{ScriptedApi, summary};

    fn fast() -> PollPolicy {
        PollPolicy::fixed(Duration::from_millis(1), 10)
    }

    fn run(api: &ScriptedApi, policy: PollPolicy) -> (JobOutcome, Vec<JobUpdate>) {
        let mut updates = Vec::new();
        let outcome = run_stats_job(api, &policy, &CancellationToken::new(), |u| {
            updates.push(u)
        });
        (outcome, updates)
    }

    #[test]
    fn test_pending_pending_success() {
        let api = ScriptedApi::new();
        api.push_status(Ok(TaskStatus::Pending));
        api.push_status(Ok(TaskStatus::Pending));
        api.push_status(Ok(TaskStatus::Succeeded(summary(3))));

        let (outcome, updates) = run(&api, fast());

        assert_eq!(outcome, JobOutcome::Succeeded(summary(3)));
        assert_eq!(api.status_queries(), 3);
        assert_eq!(
            updates.last(),
            Some(&JobUpdate::Finished(JobOutcome::Succeeded(summary(3))))
        );
    }

    #[test]
    fn test_failure_on_first_poll() {
        let api = ScriptedApi::new();
        api.push_status(Ok(TaskStatus::Failed));

        let (outcome, _) = run(&api, fast());

        assert_eq!(outcome, JobOutcome::Failed);
        assert_eq!(api.status_queries(), 1);
        assert_eq!(outcome.into_result(), Err(FolksError::JobFailed));
    }

    #[test]
    fn test_transport_error_is_surfaced() {
        let api = ScriptedApi::new();
        api.push_status(Err(FolksError::Network("reset".to_string())));

        let (outcome, _) = run(&api, fast());

        assert!(matches!(outcome, JobOutcome::TransportError(_)));
        assert!(matches!(
            outcome.into_result(),
            Err(FolksError::JobTransport(_))
        ));
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let api = ScriptedApi::new();

        let (outcome, _) = run(&api, PollPolicy::fixed(Duration::from_millis(1), 4));

        assert_eq!(outcome, JobOutcome::TimedOut { attempts: 4 });
        assert_eq!(api.status_queries(), 4);
    }

    #[test]
    fn test_submit_failure() {
        let api = ScriptedApi::new();
        api.fail_start(FolksError::Network("down".to_string()));

        let (outcome, updates) = run(&api, fast());

        assert!(matches!(outcome, JobOutcome::SubmitFailed(_)));
        assert_eq!(updates.len(), 1);
        assert_eq!(api.starts(), 1);
        assert_eq!(api.status_queries(), 0);
    }

    #[test]
    fn test_backoff_delays() {
        let policy = PollPolicy {
            initial_interval: Duration::from_millis(100),
            backoff: 2.0,
            max_interval: Duration::from_millis(500),
            max_attempts: 10,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(500));
    }

    #[test]
    fn test_cancel_interrupts_wait() {
        let api = Arc::new(ScriptedApi::new());
        let (tx, rx) = unbounded();
        let poller = JobPoller::new(api.clone(), tx);

        let handle = poller.spawn(JobId(1), PollPolicy::fixed(Duration::from_secs(30), 5));
        let start = Instant::now();
        // Wait for submission so the cancel lands during the first wait
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap().update,
            JobUpdate::Submitted(_)
        ));
        handle.cancel();
        handle.join().unwrap();

        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(api.status_queries(), 0);
        let last = rx.try_iter().last().unwrap();
        assert_eq!(last.update, JobUpdate::Finished(JobOutcome::Cancelled));
        assert_eq!(last.job, JobId(1));
    }

    #[test]
    fn test_token_wait_without_cancel_times_out() {
        let token = CancellationToken::new();
        assert!(!token.wait_timeout(Duration::from_millis(1)));
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.wait_timeout(Duration::from_secs(60)));
    }
}
