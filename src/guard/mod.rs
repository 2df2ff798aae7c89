/*!
 * RAII Lock Guards
 *
 * Scope-bound read and write access. A guard is created only after the
 * matching acquire succeeded and releases on every exit path, so an
 * unmatched release cannot be expressed through this API.
 *
 * ## Example
 *
 * ```rust
 * use policy_rwlock::{Policy, ReadersWritersLock};
 *
 * let lock = ReadersWritersLock::new(Policy::Fair);
 * {
 *     let _reader = lock.read();
 *     // shared access
 * } // released here
 * let _writer = lock.write();
 * ```
 */

mod access;
mod traits;

pub use access::{ReadGuard, WriteGuard};
pub use traits::Guard;

/// Result type for guard operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur during guard operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum GuardError {
    #[error("Resource already released")]
    #[diagnostic(
        code(guard::already_released),
        help("A guard releases its side of the lock once; drop it instead of releasing twice.")
    )]
    AlreadyReleased,
}

/// Guard metadata for observability
#[derive(Debug, Clone)]
pub struct GuardMetadata {
    pub resource_type: &'static str,
    pub creation_time: std::time::Instant,
}

impl GuardMetadata {
    #[inline]
    pub fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            creation_time: std::time::Instant::now(),
        }
    }

    /// How long the guard has been held
    #[inline]
    pub fn lifetime_micros(&self) -> u64 {
        self.creation_time.elapsed().as_micros() as u64
    }
}
