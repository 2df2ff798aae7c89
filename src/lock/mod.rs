/*!
 * Readers-Writers Lock
 * Blocking shared/exclusive admission under a switchable policy
 *
 * All state lives behind one mutex. Blocked readers and writers sleep on
 * separate condition variables so a release wakes only the class that can
 * make progress; a policy switch wakes both.
 */

use crate::config::LockConfig;
use crate::policy::admission::Wake;
use crate::policy::Policy;
use parking_lot::{Condvar, Mutex};
use tracing::info;

mod operations;
mod policy;
mod snapshot;
pub(crate) mod state;

use state::LockState;

/// Readers-writers lock with a runtime-selectable admission policy
///
/// The lock arbitrates access to a resource it does not own: callers pair
/// `acquire_*` with `release_*`, or use [`read`](Self::read) and
/// [`write`](Self::write) to get guards that release on drop. Share it
/// between threads with an `Arc`.
///
/// # Example
///
/// ```rust
/// use policy_rwlock::{Policy, ReadersWritersLock};
/// use std::sync::Arc;
/// use std::thread;
///
/// let lock = Arc::new(ReadersWritersLock::new(Policy::Fair));
/// let worker = {
///     let lock = Arc::clone(&lock);
///     thread::spawn(move || {
///         let _guard = lock.write();
///     })
/// };
/// worker.join().unwrap();
/// assert!(lock.status().is_idle());
/// ```
pub struct ReadersWritersLock {
    name: String,
    state: Mutex<LockState>,
    readers: Condvar,
    writers: Condvar,
}

impl ReadersWritersLock {
    /// Create an idle lock with the given policy
    pub fn new(policy: Policy) -> Self {
        Self::with_config(LockConfig::default().with_policy(policy))
    }

    /// Create an idle lock from a configuration
    pub fn with_config(config: LockConfig) -> Self {
        info!(lock = %config.name, policy = %config.policy, "Readers-writers lock initialized");

        Self {
            name: config.name,
            state: Mutex::new(LockState::new(config.policy)),
            readers: Condvar::new(),
            writers: Condvar::new(),
        }
    }

    /// Label used in log events
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, wake: Wake) {
        match wake {
            Wake::Nobody => {}
            Wake::OneWriter => {
                self.writers.notify_one();
            }
            Wake::AllWriters => {
                self.writers.notify_all();
            }
            Wake::AllReaders => {
                self.readers.notify_all();
            }
        }
    }
}

impl Default for ReadersWritersLock {
    fn default() -> Self {
        Self::with_config(LockConfig::default())
    }
}

impl std::fmt::Debug for ReadersWritersLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadersWritersLock")
            .field("name", &self.name)
            .field("status", &self.status())
            .finish()
    }
}
