/*!
 * Lock Operations
 * Acquire and release for readers and writers
 */

use super::ReadersWritersLock;
use crate::guard::{ReadGuard, WriteGuard};
use crate::policy::admission;
use crate::policy::Access;
use tracing::{debug, trace};

impl ReadersWritersLock {
    /// Block until the policy in force admits a reader, then enter
    pub fn acquire_read(&self) {
        let mut state = self.state.lock();
        state.register(Access::Read);

        let mut slot = None;
        loop {
            slot = state.refresh(slot, Access::Read);
            if admission::may_read(&state, slot.map(|s| s.ticket)) {
                break;
            }
            trace!(lock = %self.name, policy = %state.policy, "Reader waiting");
            self.readers.wait(&mut state);
        }

        state.admit(Access::Read, slot);
        debug!(
            lock = %self.name,
            policy = %state.policy,
            active_readers = state.active_readers,
            "Reader admitted"
        );

        let wake = admission::after_read_admission(&state);
        self.notify(wake);
    }

    /// Leave after a successful `acquire_read`
    ///
    /// # Panics
    /// If no reader holds the lock.
    pub fn release_read(&self) {
        let mut state = self.state.lock();
        state.release_read();

        let wake = admission::after_read_release(&state);
        debug!(
            lock = %self.name,
            active_readers = state.active_readers,
            wake = ?wake,
            "Reader released"
        );
        self.notify(wake);
    }

    /// Block until the policy in force admits a writer, then enter
    pub fn acquire_write(&self) {
        let mut state = self.state.lock();
        state.register(Access::Write);

        let mut slot = None;
        loop {
            slot = state.refresh(slot, Access::Write);
            if admission::may_write(&state, slot.map(|s| s.ticket)) {
                break;
            }
            trace!(lock = %self.name, policy = %state.policy, "Writer waiting");
            self.writers.wait(&mut state);
        }

        state.admit(Access::Write, slot);
        debug!(lock = %self.name, policy = %state.policy, "Writer admitted");
    }

    /// Leave after a successful `acquire_write`
    ///
    /// # Panics
    /// If no writer holds the lock.
    pub fn release_write(&self) {
        let mut state = self.state.lock();
        state.release_write();

        let wake = admission::after_write_release(&state);
        debug!(
            lock = %self.name,
            waiting_readers = state.waiting_readers,
            waiting_writers = state.waiting_writers,
            wake = ?wake,
            "Writer released"
        );
        self.notify(wake);
    }

    /// Acquire shared access, returning a guard that releases on drop
    pub fn read(&self) -> ReadGuard<'_> {
        self.acquire_read();
        ReadGuard::new(self)
    }

    /// Acquire exclusive access, returning a guard that releases on drop
    pub fn write(&self) -> WriteGuard<'_> {
        self.acquire_write();
        WriteGuard::new(self)
    }

    /// Shared access only if it can be granted without waiting
    ///
    /// In fair mode this fails whenever another request is queued.
    pub fn try_read(&self) -> Option<ReadGuard<'_>> {
        let mut state = self.state.lock();
        if !admission::may_enter_now(&state, Access::Read) {
            return None;
        }
        state.enter(Access::Read);
        drop(state);
        Some(ReadGuard::new(self))
    }

    /// Exclusive access only if it can be granted without waiting
    pub fn try_write(&self) -> Option<WriteGuard<'_>> {
        let mut state = self.state.lock();
        if !admission::may_enter_now(&state, Access::Write) {
            return None;
        }
        state.enter(Access::Write);
        drop(state);
        Some(WriteGuard::new(self))
    }
}
