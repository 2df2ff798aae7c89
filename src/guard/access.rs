/*!
 * Access Guards
 *
 * Read and write guards that hand their access back to the lock on drop
 */

use super::traits::Guard;
use super::{GuardError, GuardMetadata, GuardResult};
use crate::lock::ReadersWritersLock;
use tracing::trace;

/// Shared access to a [`ReadersWritersLock`]
///
/// # Example
///
/// ```rust
/// use policy_rwlock::{Guard, Policy, ReadersWritersLock};
///
/// let lock = ReadersWritersLock::new(Policy::ReaderPriority);
/// let mut reader = lock.read();
/// assert!(reader.is_active());
/// reader.release().unwrap();
/// assert!(reader.release().is_err());
/// ```
#[must_use = "dropping the guard releases the read access immediately"]
pub struct ReadGuard<'a> {
    lock: &'a ReadersWritersLock,
    metadata: GuardMetadata,
    active: bool,
}

impl<'a> ReadGuard<'a> {
    /// Wrap read access that has already been admitted
    pub(crate) fn new(lock: &'a ReadersWritersLock) -> Self {
        Self {
            lock,
            metadata: GuardMetadata::new("read_lock"),
            active: true,
        }
    }

    /// Lock this guard belongs to
    #[inline]
    pub fn lock(&self) -> &'a ReadersWritersLock {
        self.lock
    }
}

impl Guard for ReadGuard<'_> {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }
        self.active = false;
        self.lock.release_read();
        trace!(
            lock = %self.lock.name(),
            held_micros = self.metadata.lifetime_micros(),
            "read guard released"
        );
        Ok(())
    }
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            // Cannot fail while active
            let _ = self.release();
        }
    }
}

/// Exclusive access to a [`ReadersWritersLock`]
#[must_use = "dropping the guard releases the write access immediately"]
pub struct WriteGuard<'a> {
    lock: &'a ReadersWritersLock,
    metadata: GuardMetadata,
    active: bool,
}

impl<'a> WriteGuard<'a> {
    /// Wrap write access that has already been admitted
    pub(crate) fn new(lock: &'a ReadersWritersLock) -> Self {
        Self {
            lock,
            metadata: GuardMetadata::new("write_lock"),
            active: true,
        }
    }

    /// Lock this guard belongs to
    #[inline]
    pub fn lock(&self) -> &'a ReadersWritersLock {
        self.lock
    }
}

impl Guard for WriteGuard<'_> {
    fn resource_type(&self) -> &'static str {
        self.metadata.resource_type
    }

    fn metadata(&self) -> &GuardMetadata {
        &self.metadata
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) -> GuardResult<()> {
        if !self.active {
            return Err(GuardError::AlreadyReleased);
        }
        self.active = false;
        self.lock.release_write();
        trace!(
            lock = %self.lock.name(),
            held_micros = self.metadata.lifetime_micros(),
            "write guard released"
        );
        Ok(())
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.release();
        }
    }
}
