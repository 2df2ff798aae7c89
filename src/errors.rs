/*!
 * Error Types
 * Recoverable errors at the edges of the lock: policy parsing and snapshot verification
 *
 * Misuse of the lock itself (releasing without a matching acquire) is not an
 * error value; it panics at the call site.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse a policy name
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PolicyParseError {
    #[error("Invalid policy '{0}'. Valid: reader_priority, writer_priority, fair")]
    #[diagnostic(
        code(policy::unknown),
        help("Aliases are also accepted: readers, writers, fifo.")
    )]
    Unknown(String),
}

/// A status snapshot that breaks one of the lock invariants
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("{0} writers active at once")]
    #[diagnostic(
        code(invariant::multiple_writers),
        help("At most one writer may hold the lock.")
    )]
    MultipleWriters(usize),

    #[error("{readers} readers active while a writer holds the lock")]
    #[diagnostic(
        code(invariant::readers_during_write),
        help("Readers and a writer must never hold the lock together.")
    )]
    ReadersDuringWrite { readers: usize },

    #[error("writer flag is {flag} but {writers} writers are active")]
    #[diagnostic(
        code(invariant::writer_flag_mismatch),
        help("The writer flag must be set exactly when one writer is active.")
    )]
    WriterFlagMismatch { flag: bool, writers: usize },

    #[error("admission queue holds {0} requests outside fair mode")]
    #[diagnostic(
        code(invariant::queue_outside_fair),
        help("Only the fair policy keeps an admission queue.")
    )]
    QueueOutsideFair(usize),

    #[error("admission queue holds {queued} requests but only {waiting} are waiting")]
    #[diagnostic(
        code(invariant::queue_exceeds_waiters),
        help("Every queued request belongs to a thread blocked in acquire.")
    )]
    QueueExceedsWaiters { queued: usize, waiting: usize },
}
