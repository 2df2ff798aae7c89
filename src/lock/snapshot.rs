/*!
 * Lock Status Reporting
 * Snapshot and log the lock counters
 */

use super::ReadersWritersLock;
use crate::status::LockStatus;
use tracing::info;

impl ReadersWritersLock {
    /// Get a consistent snapshot of the counters
    ///
    /// Holds the internal mutex only while copying a handful of fields.
    pub fn status(&self) -> LockStatus {
        self.state.lock().snapshot()
    }

    /// Emit the current status as an info event
    pub fn log_status(&self, prefix: &str) {
        let status = self.status();
        if prefix.is_empty() {
            info!(lock = %self.name, "{}", status);
        } else {
            info!(lock = %self.name, "{} {}", prefix, status);
        }
    }
}
