/*!
 * Lock Policy Management
 * Switch the admission policy while threads are blocked
 */

use super::ReadersWritersLock;
use crate::policy::Policy;
use tracing::{debug, info};

impl ReadersWritersLock {
    /// Change the admission policy
    ///
    /// Every blocked thread is woken to re-evaluate its predicate under the
    /// new policy. Moving into or out of `Fair` discards the admission queue;
    /// fair-mode waiters then rejoin the queue in wake-up order, so their
    /// earlier arrival order is not preserved across the switch.
    pub fn set_policy(&self, new_policy: Policy) {
        let mut state = self.state.lock();
        let current_policy = state.policy;
        if new_policy == current_policy {
            debug!(lock = %self.name, policy = %current_policy, "Policy unchanged");
            return;
        }

        let dropped = state.queue.len();
        let reset = state.switch_policy(new_policy);

        info!(
            lock = %self.name,
            from = %current_policy,
            to = %new_policy,
            queue_reset = reset,
            dropped_requests = dropped,
            waiting_readers = state.waiting_readers,
            waiting_writers = state.waiting_writers,
            "Changing admission policy (waking all waiters)"
        );

        self.readers.notify_all();
        self.writers.notify_all();
    }

    /// Get current admission policy
    pub fn policy(&self) -> Policy {
        self.state.lock().policy
    }
}
