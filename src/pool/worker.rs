//! Worker thread implementation

use crate::core::{BoxedJob, PoolError, Result, ShutdownToken};
use crate::pool::thread_pool::PoolShared;
use log::{debug, error, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    jobs_processed: AtomicU64,
    jobs_failed: AtomicU64,
    jobs_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    fn increment_processed(&self) {
        self.jobs_processed.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_failed(&self) {
        self.jobs_failed.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_panicked(&self) {
        self.jobs_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total jobs processed successfully
    pub fn jobs_processed(&self) -> u64 {
        self.jobs_processed.load(Ordering::Relaxed)
    }

    /// Get total jobs that returned an error
    pub fn jobs_failed(&self) -> u64 {
        self.jobs_failed.load(Ordering::Relaxed)
    }

    /// Get total jobs that panicked
    pub fn jobs_panicked(&self) -> u64 {
        self.jobs_panicked.load(Ordering::Relaxed)
    }
}

/// A worker thread processing jobs from the pool's shared queue
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker against the pool's shared state
    ///
    /// # Shutdown Behavior
    ///
    /// The worker exits once the shutdown flag is set and the queue is
    /// empty, so every queued job is processed before shutdown completes.
    pub(crate) fn spawn(id: usize, shared: Arc<PoolShared>, name_prefix: &str) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", name_prefix, id))
            .spawn(move || {
                Self::run(id, shared, stats_clone);
            })
            .map_err(|e| PoolError::spawn_with_source(id, "OS failed to create thread", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread, blocking until it exits
    pub(crate) fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PoolError::join(self.id, "worker panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop
    ///
    /// Dequeue checks happen under the pool mutex and are re-evaluated after
    /// every condition-variable wake, so spurious wakeups are tolerated. The
    /// shutdown flag is consulted only when the queue is empty, which gives
    /// drain-to-empty semantics: queued jobs always run before the worker
    /// exits.
    fn run(id: usize, shared: Arc<PoolShared>, stats: Arc<WorkerStats>) {
        debug!("worker {} started", id);

        loop {
            let job = {
                let mut queue = shared.queue.lock();
                loop {
                    if let Some(job) = queue.pop() {
                        break Some(job);
                    }
                    if shared.shutdown.is_shutting_down() {
                        break None;
                    }
                    shared.work_available.wait(&mut queue);
                }
            };

            let Some(mut job) = job else {
                debug!(
                    "worker {} exiting ({} jobs processed, {} failed, {} panicked)",
                    id,
                    stats.jobs_processed(),
                    stats.jobs_failed(),
                    stats.jobs_panicked()
                );
                return;
            };

            // Executed outside the lock so other workers keep dequeuing.
            Self::run_job(id, &mut job, &shared.shutdown, &stats);
        }
    }

    /// Execute a single job with panic protection
    fn run_job(id: usize, job: &mut BoxedJob, shutdown: &ShutdownToken, stats: &WorkerStats) {
        let result = catch_unwind(AssertUnwindSafe(|| job.run(shutdown)));

        match result {
            Ok(Ok(())) => {
                stats.increment_processed();
            }
            Ok(Err(e)) => {
                warn!("worker {}: job '{}' failed: {}", id, job.job_type(), e);
                stats.increment_failed();
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("worker {}: job '{}' panicked: {}", id, job.job_type(), panic_msg);
                stats.increment_panicked();
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // The pool joins workers explicitly during shutdown; a handle still
        // present here means the worker was dropped on an error path after
        // the shutdown flag was already set, so the join terminates.
        if let Some(thread) = self.thread.take() {
            if let Err(panic_info) = thread.join() {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("worker {} panicked during shutdown: {}", self.id, panic_msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClosureJob;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn shared_state() -> Arc<PoolShared> {
        Arc::new(PoolShared::new())
    }

    fn push_and_signal(shared: &PoolShared, job: BoxedJob) {
        shared.queue.lock().push(job);
        shared.work_available.notify_one();
    }

    fn trigger_shutdown(shared: &PoolShared) {
        {
            let _queue = shared.queue.lock();
            shared.shutdown.trigger();
        }
        shared.work_available.notify_all();
    }

    #[test]
    fn test_worker_creation_and_join() {
        let shared = shared_state();
        let worker = Worker::spawn(0, Arc::clone(&shared), "test").expect("Failed to spawn");
        assert_eq!(worker.id(), 0);

        trigger_shutdown(&shared);
        worker.join().expect("Failed to join worker");
    }

    #[test]
    fn test_worker_job_execution() {
        let shared = shared_state();
        let worker = Worker::spawn(0, Arc::clone(&shared), "test").expect("Failed to spawn");
        let stats = worker.stats();

        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);
        push_and_signal(
            &shared,
            Box::new(ClosureJob::new(move |_| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })),
        );

        thread::sleep(Duration::from_millis(100));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
        assert_eq!(stats.jobs_processed(), 1);
        assert_eq!(stats.jobs_failed(), 0);

        trigger_shutdown(&shared);
        worker.join().expect("Failed to join worker");
    }

    #[test]
    fn test_worker_drains_before_exit() {
        let shared = shared_state();

        // Queue jobs before the worker exists, then request shutdown
        // immediately: the worker must still run everything.
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..5 {
            let counter_clone = Arc::clone(&counter);
            shared.queue.lock().push(Box::new(ClosureJob::new(move |_| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })));
        }

        let worker = Worker::spawn(0, Arc::clone(&shared), "test").expect("Failed to spawn");
        trigger_shutdown(&shared);
        worker.join().expect("Failed to join worker");

        assert_eq!(counter.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_worker_panic_handling() {
        let shared = shared_state();
        let worker = Worker::spawn(0, Arc::clone(&shared), "test").expect("Failed to spawn");
        let stats = worker.stats();

        push_and_signal(
            &shared,
            Box::new(ClosureJob::new(|_| -> Result<()> {
                panic!("Intentional panic for testing");
            })),
        );

        thread::sleep(Duration::from_millis(100));
        assert_eq!(stats.jobs_panicked(), 1);
        assert_eq!(stats.jobs_processed(), 0);

        // Worker must survive the panic and keep processing.
        push_and_signal(&shared, Box::new(ClosureJob::new(|_| Ok(()))));
        thread::sleep(Duration::from_millis(100));
        assert_eq!(stats.jobs_processed(), 1);

        trigger_shutdown(&shared);
        worker.join().expect("Failed to join worker");
    }

    #[test]
    fn test_worker_passes_token_to_job() {
        let shared = shared_state();
        let worker = Worker::spawn(0, Arc::clone(&shared), "test").expect("Failed to spawn");

        let observed = Arc::new(AtomicUsize::new(0));
        let observed_clone = Arc::clone(&observed);
        push_and_signal(
            &shared,
            Box::new(ClosureJob::new(move |shutdown: &ShutdownToken| {
                while !shutdown.is_shutting_down() {
                    thread::sleep(Duration::from_millis(5));
                }
                observed_clone.fetch_add(1, Ordering::Relaxed);
                Ok(())
            })),
        );

        // Give the worker time to pick up the looping job, then shut down.
        thread::sleep(Duration::from_millis(50));
        trigger_shutdown(&shared);
        worker.join().expect("Failed to join worker");

        assert_eq!(observed.load(Ordering::Relaxed), 1);
    }
}
