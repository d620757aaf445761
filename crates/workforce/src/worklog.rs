use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use musicshop_core::UserId;

/// A single work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    user_id: UserId,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
}

impl WorkLog {
    pub fn open(user_id: UserId, check_in_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            check_in_time,
            check_out_time: None,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn check_in_time(&self) -> DateTime<Utc> {
        self.check_in_time
    }

    pub fn check_out_time(&self) -> Option<DateTime<Utc>> {
        self.check_out_time
    }

    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Closed: check-out minus check-in. Open: `now` minus check-in.
    pub fn duration_at(&self, now: DateTime<Utc>) -> Duration {
        self.check_out_time.unwrap_or(now) - self.check_in_time
    }

    pub fn duration(&self) -> Duration {
        self.duration_at(Utc::now())
    }

    pub(crate) fn close(&mut self, at: DateTime<Utc>) {
        self.check_out_time = Some(at);
    }
}
