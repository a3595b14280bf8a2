use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::FolksError;
use crate::api::PersonApi;
use crate::model::PersonId;

/// What to do after a delete call fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Stop at the first failure; the rest are skipped
    #[default]
    FailFast,
    /// Attempt every id regardless of earlier failures
    ContinueOnError,
}

/// Bulk delete phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePhase {
    #[default]
    Idle,
    /// Waiting for the operator to confirm `count` deletions
    Confirming { count: usize },
    Deleting { completed: usize, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed(String),
    /// Never attempted because an earlier delete failed
    Skipped,
}

/// Per-id result of a bulk delete, in the order the ids were attempted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteReport {
    pub outcomes: Vec<(PersonId, DeleteOutcome)>,
}

impl DeleteReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn deleted_ids(&self) -> Vec<PersonId> {
        self.ids_where(|o| matches!(o, DeleteOutcome::Deleted))
    }

    pub fn failed_ids(&self) -> Vec<PersonId> {
        self.ids_where(|o| matches!(o, DeleteOutcome::Failed(_)))
    }

    /// Ids that still exist: failed or skipped
    pub fn remaining_ids(&self) -> Vec<PersonId> {
        self.ids_where(|o| !matches!(o, DeleteOutcome::Deleted))
    }

    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|(_, o)| matches!(o, DeleteOutcome::Deleted))
    }

    pub fn first_failure(&self) -> Option<(PersonId, &str)> {
        self.outcomes.iter().find_map(|(id, o)| match o {
            DeleteOutcome::Failed(reason) => Some((*id, reason.as_str())),
            _ => None,
        })
    }

    /// `PartialFailure` unless every id was deleted
    pub fn error(&self) -> Option<FolksError> {
        if self.is_success() {
            None
        } else {
            Some(FolksError::PartialFailure {
                deleted: self.deleted_ids().len(),
                total: self.total(),
            })
        }
    }

    fn ids_where(&self, pred: impl Fn(&DeleteOutcome) -> bool) -> Vec<PersonId> {
        self.outcomes
            .iter()
            .filter(|(_, o)| pred(o))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Progress from a bulk delete worker
#[derive(Debug, Clone)]
pub enum DeleteMessage {
    Progress { completed: usize, total: usize },
    Finished(DeleteReport),
}

/// Delete `ids` one at a time, in order.
///
/// Not atomic: ids deleted before a failure stay deleted.
pub fn delete_sequentially(
    api: &dyn PersonApi,
    ids: &[PersonId],
    policy: DeletePolicy,
    mut on_progress: impl FnMut(usize, usize),
) -> DeleteReport {
    let total = ids.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut halted = false;

    for (i, &id) in ids.iter().enumerate() {
        if halted {
            outcomes.push((id, DeleteOutcome::Skipped));
            continue;
        }
        match api.delete_person(id) {
            Ok(()) => {
                info!(%id, "deleted");
                outcomes.push((id, DeleteOutcome::Deleted));
            }
            Err(e) => {
                warn!(%id, error = %e, "delete failed");
                outcomes.push((id, DeleteOutcome::Failed(e.to_string())));
                halted = policy == DeletePolicy::FailFast;
            }
        }
        on_progress(i + 1, total);
    }

    DeleteReport { outcomes }
}

/// Runs bulk deletes on a background thread
pub struct BulkDeleter {
    api: Arc<dyn PersonApi>,
    tx: Sender<DeleteMessage>,
}

impl BulkDeleter {
    pub fn new(api: Arc<dyn PersonApi>, tx: Sender<DeleteMessage>) -> Self {
        Self { api, tx }
    }

    pub fn spawn(&self, ids: Vec<PersonId>, policy: DeletePolicy) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let report = delete_sequentially(api.as_ref(), &ids, policy, |completed, total| {
                let _ = tx.send(DeleteMessage::Progress { completed, total });
            });
            let _ = tx.send(DeleteMessage::Finished(report));
        })
    }
}
