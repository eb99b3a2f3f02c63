//! Sequential FIFO job queue.
//!
//! [`JobQueue`] carries no synchronization of its own: every caller must hold
//! the pool's mutex around any call. The pool is the only consumer of this
//! type; it keeps the queue and the shutdown flag under a single lock so
//! workers always observe a consistent pair.
//!
//! Jobs are consumed in insertion order. An empty dequeue is a normal
//! outcome (`None`), not an error.

use crate::core::BoxedJob;
use std::collections::VecDeque;

/// An unbounded FIFO of pending jobs, backed by a `VecDeque`.
#[derive(Default)]
pub struct JobQueue {
    jobs: VecDeque<BoxedJob>,
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobQueue")
            .field("len", &self.jobs.len())
            .finish()
    }
}

impl JobQueue {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a job at the tail. O(1) amortized.
    pub fn push(&mut self, job: BoxedJob) {
        self.jobs.push_back(job);
    }

    /// Removes and returns the head job, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<BoxedJob> {
        self.jobs.pop_front()
    }

    /// Returns the number of queued jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` if no jobs are queued.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
