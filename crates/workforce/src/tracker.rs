//! Check-in/check-out state machine per worker.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use musicshop_core::store::{load_or_empty, write_through};
use musicshop_core::{Collection, Committed, DocumentStore, DomainError, UserId};

use crate::worklog::WorkLog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkLogError {
    #[error("user {0} is already checked in")]
    AlreadyCheckedIn(UserId),

    #[error("user {0} is not checked in")]
    NotCheckedIn(UserId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Work-log tracker.
///
/// `active` answers "is this worker on the clock" without scanning
/// `history`; `history` is the append-only audit trail of closed sessions.
/// Open sessions are not persisted, so a new tracker starts with nobody
/// checked in.
#[derive(Debug)]
pub struct WorkLogTracker<S> {
    store: S,
    active: HashMap<UserId, WorkLog>,
    history: Vec<WorkLog>,
}

impl<S> WorkLogTracker<S>
where
    S: DocumentStore,
{
    pub fn open(store: S) -> Self {
        let history = load_or_empty(&store, Collection::WorkLogs);
        Self {
            store,
            active: HashMap::new(),
            history,
        }
    }

    pub fn check_in(&mut self, user_id: UserId) -> Result<&WorkLog, WorkLogError> {
        self.check_in_at(user_id, Utc::now())
    }

    /// Open a session for `user_id` starting at `at`.
    pub fn check_in_at(&mut self, user_id: UserId, at: DateTime<Utc>) -> Result<&WorkLog, WorkLogError> {
        if self.active.contains_key(&user_id) {
            tracing::warn!(%user_id, "check-in rejected: already checked in");
            return Err(WorkLogError::AlreadyCheckedIn(user_id));
        }

        tracing::info!(%user_id, check_in = %at, "checked in");
        Ok(self
            .active
            .entry(user_id)
            .or_insert_with(|| WorkLog::open(user_id, at)))
    }

    pub fn check_out(&mut self, user_id: UserId) -> Result<Committed<WorkLog>, WorkLogError> {
        self.check_out_at(user_id, Utc::now())
    }

    /// Close the open session for `user_id` at `at`, append it to history and persist.
    pub fn check_out_at(
        &mut self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> Result<Committed<WorkLog>, WorkLogError> {
        let Some(open) = self.active.get(&user_id) else {
            tracing::warn!(%user_id, "check-out rejected: not checked in");
            return Err(WorkLogError::NotCheckedIn(user_id));
        };

        if at < open.check_in_time() {
            return Err(DomainError::validation("check-out cannot precede check-in").into());
        }

        let mut log = self
            .active
            .remove(&user_id)
            .ok_or(WorkLogError::NotCheckedIn(user_id))?;
        log.close(at);
        tracing::info!(%user_id, minutes = log.duration_at(at).num_minutes(), "checked out");

        self.history.push(log.clone());
        let durability = write_through(&self.store, Collection::WorkLogs, &self.history);
        Ok(Committed::new(log, durability))
    }

    pub fn is_checked_in(&self, user_id: UserId) -> bool {
        self.active.contains_key(&user_id)
    }

    pub fn active_session(&self, user_id: UserId) -> Option<&WorkLog> {
        self.active.get(&user_id)
    }

    pub fn history(&self) -> &[WorkLog] {
        &self.history
    }

    /// Total of `user_id`'s closed sessions. An open session is not counted.
    pub fn total_work_time(&self, user_id: UserId) -> Duration {
        self.closed()
            .filter(|log| log.user_id() == user_id)
            .fold(Duration::zero(), |acc, log| acc + closed_duration(log))
    }

    /// Cumulative closed-session time per worker.
    pub fn all_work_logs(&self) -> BTreeMap<UserId, Duration> {
        let mut totals = BTreeMap::new();
        for log in self.closed() {
            *totals.entry(log.user_id()).or_insert_with(Duration::zero) += closed_duration(log);
        }
        totals
    }

    fn closed(&self) -> impl Iterator<Item = &WorkLog> {
        self.history.iter().filter(|log| !log.is_open())
    }
}

fn closed_duration(log: &WorkLog) -> Duration {
    log.check_out_time()
        .map(|out| out - log.check_in_time())
        .unwrap_or_else(Duration::zero)
}
