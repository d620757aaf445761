//! Employee time tracking.
//!
//! One open session per worker, tracked in an active index; closed sessions
//! are appended to a persisted history.

pub mod tracker;
pub mod worklog;

pub use tracker::{WorkLogError, WorkLogTracker};
pub use worklog::WorkLog;
