/*!
 * Lock Status
 * Point-in-time snapshot of a lock's counters for diagnostics
 */

use crate::errors::InvariantViolation;
use crate::policy::Policy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot returned by [`ReadersWritersLock::status`](crate::ReadersWritersLock::status)
///
/// Copied out in one short critical section, so the fields are mutually
/// consistent. They may be stale by the time the caller looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LockStatus {
    pub active_readers: usize,
    pub waiting_readers: usize,
    pub active_writers: usize,
    pub waiting_writers: usize,
    pub writer_active: bool,
    pub policy: Policy,
    pub queue_length: usize,
}

impl LockStatus {
    /// Threads currently blocked in `acquire_*`
    #[inline]
    pub const fn waiting(&self) -> usize {
        self.waiting_readers + self.waiting_writers
    }

    /// True when nobody holds or waits for the lock
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.active_readers == 0 && self.active_writers == 0 && self.waiting() == 0
    }

    /// Check the snapshot against the lock invariants
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        if self.active_writers > 1 {
            return Err(InvariantViolation::MultipleWriters(self.active_writers));
        }
        if self.active_writers == 1 && self.active_readers > 0 {
            return Err(InvariantViolation::ReadersDuringWrite {
                readers: self.active_readers,
            });
        }
        if self.writer_active != (self.active_writers == 1) {
            return Err(InvariantViolation::WriterFlagMismatch {
                flag: self.writer_active,
                writers: self.active_writers,
            });
        }
        if !self.policy.is_queued() && self.queue_length > 0 {
            return Err(InvariantViolation::QueueOutsideFair(self.queue_length));
        }
        // Waiters re-register lazily after a switch into fair mode,
        // so the queue may briefly be shorter than the waiter count.
        if self.queue_length > self.waiting() {
            return Err(InvariantViolation::QueueExceedsWaiters {
                queued: self.queue_length,
                waiting: self.waiting(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "active readers: {}, waiting readers: {}, active writers: {} (writer active: {}), waiting writers: {}",
            self.active_readers,
            self.waiting_readers,
            self.active_writers,
            if self.writer_active { "yes" } else { "no" },
            self.waiting_writers,
        )?;
        if self.policy.is_queued() {
            write!(f, ", queue: {}", self.queue_length)?;
        }
        write!(f, ", policy: {}", self.policy)
    }
}
