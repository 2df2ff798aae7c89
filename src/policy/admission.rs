/*!
 * Admission Decisions
 * Pure predicates deciding whether a request may enter, and whom to wake on release
 */

use super::types::{Access, Policy};
use crate::lock::state::{LockState, Ticket};

/// Wake-up action to perform after a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wake {
    Nobody,
    OneWriter,
    AllWriters,
    AllReaders,
}

/// Read admission predicate for the policy in force
///
/// `ticket` is the waiter's queue ticket; it is only consulted in fair mode.
#[inline]
pub(crate) fn may_read(state: &LockState, ticket: Option<Ticket>) -> bool {
    if state.writer_active {
        return false;
    }

    match state.policy {
        Policy::ReaderPriority => true,
        Policy::WriterPriority => state.waiting_writers == 0,
        Policy::Fair => at_front(state, ticket, Access::Read),
    }
}

/// Write admission predicate for the policy in force
#[inline]
pub(crate) fn may_write(state: &LockState, ticket: Option<Ticket>) -> bool {
    if state.writer_active || state.active_readers > 0 {
        return false;
    }

    match state.policy {
        // Registered readers go first, even those woken but not yet running
        Policy::ReaderPriority => state.waiting_readers == 0,
        Policy::WriterPriority => true,
        Policy::Fair => at_front(state, ticket, Access::Write),
    }
}

/// Whether a request may enter right now without registering as a waiter
///
/// In fair mode this only holds when nobody is queued ahead.
pub(crate) fn may_enter_now(state: &LockState, access: Access) -> bool {
    if state.policy.is_queued() && !state.queue.is_empty() {
        return false;
    }

    match (state.policy, access) {
        (Policy::Fair, Access::Read) => !state.writer_active,
        (Policy::Fair, Access::Write) => !state.writer_active && state.active_readers == 0,
        (_, Access::Read) => may_read(state, None),
        (_, Access::Write) => may_write(state, None),
    }
}

fn at_front(state: &LockState, ticket: Option<Ticket>, access: Access) -> bool {
    match (ticket, state.queue.front()) {
        (Some(ticket), Some(front)) => front.ticket == ticket && front.access == access,
        _ => false,
    }
}

/// Whom to wake once a reader has been admitted
///
/// Fair mode admits one reader per queue head; when the next head is also a
/// reader it can share the lock, so the readers are woken to re-check.
pub(crate) fn after_read_admission(state: &LockState) -> Wake {
    match (state.policy, state.front()) {
        (Policy::Fair, Some(Access::Read)) => Wake::AllReaders,
        _ => Wake::Nobody,
    }
}

/// Whom to wake after a reader leaves
pub(crate) fn after_read_release(state: &LockState) -> Wake {
    match state.policy {
        Policy::Fair => wake_front(state),
        _ if state.active_readers == 0 => Wake::OneWriter,
        _ => Wake::Nobody,
    }
}

/// Whom to wake after the writer leaves
pub(crate) fn after_write_release(state: &LockState) -> Wake {
    match state.policy {
        Policy::ReaderPriority => {
            if state.waiting_readers > 0 {
                Wake::AllReaders
            } else if state.waiting_writers > 0 {
                Wake::OneWriter
            } else {
                Wake::Nobody
            }
        }
        Policy::WriterPriority => {
            if state.waiting_writers > 0 {
                Wake::OneWriter
            } else if state.waiting_readers > 0 {
                Wake::AllReaders
            } else {
                Wake::Nobody
            }
        }
        Policy::Fair => wake_front(state),
    }
}

// Queue slots are per waiter, so a single notify could land on the wrong one.
fn wake_front(state: &LockState) -> Wake {
    match state.front() {
        Some(Access::Read) => Wake::AllReaders,
        Some(Access::Write) if state.active_readers == 0 => Wake::AllWriters,
        _ => Wake::Nobody,
    }
}
