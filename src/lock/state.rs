/*!
 * Lock State
 * Counters, writer flag and fair-mode admission queue, mutated only under the lock mutex
 */

use crate::policy::{Access, Policy};
use crate::status::LockStatus;
use std::collections::VecDeque;

/// Arrival number handed to a request entering the fair queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Ticket(u64);

/// Queued, not yet admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Request {
    pub ticket: Ticket,
    pub access: Access,
}

/// A waiter's place in the admission queue
///
/// Only valid for the queue generation it was issued in. Clearing the
/// queue starts a new generation, which invalidates every outstanding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub ticket: Ticket,
    generation: u64,
}

#[derive(Debug)]
pub(crate) struct LockState {
    pub policy: Policy,
    pub active_readers: usize,
    pub waiting_readers: usize,
    pub active_writers: usize,
    pub waiting_writers: usize,
    pub writer_active: bool,
    pub queue: VecDeque<Request>,
    next_ticket: u64,
    generation: u64,
}

impl LockState {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            active_readers: 0,
            waiting_readers: 0,
            active_writers: 0,
            waiting_writers: 0,
            writer_active: false,
            queue: VecDeque::new(),
            next_ticket: 0,
            generation: 0,
        }
    }

    /// Access kind at the head of the admission queue
    #[inline]
    pub fn front(&self) -> Option<Access> {
        self.queue.front().map(|r| r.access)
    }

    #[inline]
    pub fn front_ticket(&self) -> Option<Ticket> {
        self.queue.front().map(|r| r.ticket)
    }

    /// Record a request that is about to wait
    pub fn register(&mut self, access: Access) {
        match access {
            Access::Read => self.waiting_readers += 1,
            Access::Write => self.waiting_writers += 1,
        }
    }

    /// Bring a waiter's queue slot in line with the policy in force
    ///
    /// Under the fair policy a waiter without a live slot joins the tail of
    /// the queue. Under the other policies slots are dropped.
    pub fn refresh(&mut self, slot: Option<Slot>, access: Access) -> Option<Slot> {
        if !self.policy.is_queued() {
            return None;
        }

        match slot {
            Some(slot) if slot.generation == self.generation => Some(slot),
            _ => Some(self.enqueue(access)),
        }
    }

    fn enqueue(&mut self, access: Access) -> Slot {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.queue.push_back(Request { ticket, access });
        Slot {
            ticket,
            generation: self.generation,
        }
    }

    /// Move a registered waiter into the active set
    pub fn admit(&mut self, access: Access, slot: Option<Slot>) {
        match access {
            Access::Read => self.waiting_readers -= 1,
            Access::Write => self.waiting_writers -= 1,
        }

        if let Some(slot) = slot {
            let popped = self.queue.pop_front();
            debug_assert_eq!(popped.map(|r| r.ticket), Some(slot.ticket));
        }

        self.enter(access);
    }

    /// Take the lock without having waited
    pub fn enter(&mut self, access: Access) {
        match access {
            Access::Read => self.active_readers += 1,
            Access::Write => {
                self.writer_active = true;
                self.active_writers += 1;
            }
        }
        self.debug_check();
    }

    pub fn release_read(&mut self) {
        assert!(
            self.active_readers > 0,
            "release_read called without a matching acquire_read"
        );
        self.active_readers -= 1;
        self.debug_check();
    }

    pub fn release_write(&mut self) {
        assert!(
            self.writer_active && self.active_writers == 1,
            "release_write called without a matching acquire_write"
        );
        self.writer_active = false;
        self.active_writers -= 1;
        self.debug_check();
    }

    /// Swap the policy, returning true if the admission queue was reset
    ///
    /// Entering or leaving the fair policy discards the queue; waiters
    /// holding a slot re-register on their next evaluation.
    pub fn switch_policy(&mut self, policy: Policy) -> bool {
        let reset = self.policy.is_queued() || policy.is_queued();
        if reset {
            self.queue.clear();
            self.generation += 1;
        }
        self.policy = policy;
        reset
    }

    pub fn snapshot(&self) -> LockStatus {
        LockStatus {
            active_readers: self.active_readers,
            waiting_readers: self.waiting_readers,
            active_writers: self.active_writers,
            waiting_writers: self.waiting_writers,
            writer_active: self.writer_active,
            policy: self.policy,
            queue_length: self.queue.len(),
        }
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(self.active_writers <= 1);
        debug_assert!(self.active_writers == 0 || self.active_readers == 0);
        debug_assert_eq!(self.writer_active, self.active_writers == 1);
    }
}
