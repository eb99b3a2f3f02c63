//! Shutdown signalling shared between the pool, its workers, and running jobs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Advisory shutdown indicator handed to every job at execution time.
///
/// The flag transitions from `false` to `true` exactly once and is never
/// reset. The pool performs the transition while holding its queue mutex,
/// so workers deciding between "wait" and "exit" always observe a consistent
/// queue/flag pair. Jobs read the token lock-free.
///
/// Shutdown is cooperative: a long-running job is expected to poll the token
/// and return early once it is set. The pool never interrupts a job that
/// ignores it; such a job delays shutdown until its natural completion.
///
/// # Example
///
/// ```rust
/// use workpool::prelude::*;
///
/// # fn main() -> Result<()> {
/// let pool = ThreadPool::new(2)?;
///
/// pool.execute(|shutdown| {
///     while !shutdown.is_shutting_down() {
///         // chunk of work...
///         std::thread::sleep(std::time::Duration::from_millis(10));
///     }
///     Ok(())
/// })?;
///
/// pool.shutdown()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl std::fmt::Debug for ShutdownToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownToken")
            .field("shutting_down", &self.is_shutting_down())
            .finish()
    }
}

impl ShutdownToken {
    /// Create a new token (not set)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether shutdown has been requested
    ///
    /// This is a lock-free read suitable for frequent polling in hot loops.
    #[inline]
    pub fn is_shutting_down(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Set the flag. One-way: there is no reset.
    ///
    /// Callers must hold the pool's queue mutex so the transition is
    /// serialized with queue mutation.
    pub(crate) fn trigger(&self) {
        self.flag.store(true, Ordering::Release);
    }
}
