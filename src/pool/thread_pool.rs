//! Thread pool implementation

use crate::core::{BoxedJob, ClosureJob, Job, PoolError, Result, ShutdownToken};
use crate::pool::worker::{Worker, WorkerStats};
use crate::queue::JobQueue;
use log::debug;
use parking_lot::{Condvar, Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for the worker pool
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of worker threads. Must be at least 1.
    pub num_threads: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl PoolConfig {
    /// Create a new configuration with the specified number of threads
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            thread_name_prefix: "worker".to_string(),
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(PoolError::invalid_thread_count(self.num_threads));
        }
        Ok(())
    }
}

/// State shared between the pool handle and every worker.
///
/// The queue mutex is the sole serialization point: queue mutation and the
/// shutdown flag's one-way transition both happen under it. The condition
/// variable is paired with that mutex; workers wait on it when the queue is
/// empty and shutdown has not been requested.
pub(crate) struct PoolShared {
    pub(crate) queue: Mutex<JobQueue>,
    pub(crate) work_available: Condvar,
    pub(crate) shutdown: ShutdownToken,
}

impl PoolShared {
    pub(crate) fn new() -> Self {
        Self {
            queue: Mutex::new(JobQueue::new()),
            work_available: Condvar::new(),
            shutdown: ShutdownToken::new(),
        }
    }
}

/// A fixed-size pool of worker threads executing jobs from a shared FIFO queue
///
/// The worker count is fixed at construction and all workers are spawned as
/// part of it: a returned pool is fully running, and any spawn failure rolls
/// back the partially-built pool before the error is surfaced.
///
/// # Shutdown Mechanism
///
/// [`shutdown()`](Self::shutdown) sets a shared flag under the queue mutex,
/// wakes every waiting worker, and joins them. Workers drain the queue to
/// empty before exiting, so no queued job is dropped. Running jobs receive a
/// [`ShutdownToken`] and are expected to poll it; the pool never interrupts
/// a job mid-execution (cooperative shutdown, not forced termination).
pub struct ThreadPool {
    config: PoolConfig,
    shared: Arc<PoolShared>,
    workers: RwLock<Vec<Worker>>,
    total_jobs_submitted: AtomicU64,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("config", &self.config)
            .field("shutting_down", &self.shared.shutdown.is_shutting_down())
            .field(
                "total_jobs_submitted",
                &self.total_jobs_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl ThreadPool {
    /// Create a pool with the specified number of worker threads
    ///
    /// All workers are spawned before this returns; the pool is immediately
    /// ready to accept submissions.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidThreadCount`] if `num_threads` is zero
    /// - [`PoolError::Spawn`] if the OS refuses a thread; already-spawned
    ///   workers are signalled and joined before the error is returned
    pub fn new(num_threads: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(num_threads))
    }

    /// Create a pool with custom configuration
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        let shared = Arc::new(PoolShared::new());

        let mut workers = Vec::with_capacity(config.num_threads);
        for id in 0..config.num_threads {
            match Worker::spawn(id, Arc::clone(&shared), &config.thread_name_prefix) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Roll back: no partially-usable pool is ever observed.
                    {
                        let _queue = shared.queue.lock();
                        shared.shutdown.trigger();
                    }
                    shared.work_available.notify_all();
                    for worker in workers {
                        let _ = worker.join();
                    }
                    return Err(e);
                }
            }
        }

        debug!(
            "pool '{}' started with {} workers",
            config.thread_name_prefix, config.num_threads
        );

        Ok(Self {
            config,
            shared,
            workers: RwLock::new(workers),
            total_jobs_submitted: AtomicU64::new(0),
        })
    }

    /// Submit a job to the pool
    ///
    /// Appends the job at the tail of the queue and wakes one idle worker.
    /// Never blocks on worker availability: the queue is unbounded, so the
    /// only wait is the brief mutex hold.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShuttingDown`] if shutdown has already begun.
    pub fn submit<J: Job + 'static>(&self, job: J) -> Result<()> {
        self.submit_boxed(Box::new(job))
    }

    fn submit_boxed(&self, job: BoxedJob) -> Result<()> {
        if self.shared.shutdown.is_shutting_down() {
            return Err(PoolError::shutting_down(self.queue_len()));
        }

        {
            let mut queue = self.shared.queue.lock();
            // Shutdown may have begun between the check above and taking
            // the lock; the flag only transitions under this mutex.
            if self.shared.shutdown.is_shutting_down() {
                return Err(PoolError::shutting_down(queue.len()));
            }
            queue.push(job);
        }
        self.shared.work_available.notify_one();

        self.total_jobs_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Submit a closure as a job
    ///
    /// The closure receives the pool's [`ShutdownToken`] so long-running
    /// work can poll it and exit cooperatively.
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&ShutdownToken) -> Result<()> + Send + 'static,
    {
        self.submit(ClosureJob::new(f))
    }

    /// Get the number of worker threads
    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    /// Check if shutdown has been requested
    pub fn is_shutting_down(&self) -> bool {
        self.shared.shutdown.is_shutting_down()
    }

    /// Get the current number of queued jobs
    pub fn queue_len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    /// Get total number of jobs submitted
    pub fn total_jobs_submitted(&self) -> u64 {
        self.total_jobs_submitted.load(Ordering::Relaxed)
    }

    /// Get statistics for all workers
    pub fn worker_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.workers.read().iter().map(|w| w.stats()).collect()
    }

    /// Get total jobs processed across all workers
    pub fn total_jobs_processed(&self) -> u64 {
        let workers = self.workers.read();
        workers.iter().map(|w| w.stats().jobs_processed()).sum()
    }

    /// Get total jobs failed across all workers
    pub fn total_jobs_failed(&self) -> u64 {
        let workers = self.workers.read();
        workers.iter().map(|w| w.stats().jobs_failed()).sum()
    }

    /// Get total jobs panicked across all workers
    pub fn total_jobs_panicked(&self) -> u64 {
        let workers = self.workers.read();
        workers.iter().map(|w| w.stats().jobs_panicked()).sum()
    }

    /// Shut down the pool and wait for all workers to finish
    ///
    /// # Graceful Shutdown
    ///
    /// 1. Sets the shutdown flag under the queue mutex (new submissions are
    ///    rejected from this point)
    /// 2. Broadcasts on the condition variable so every waiting worker wakes
    /// 3. Joins all workers; each drains the queue to empty before exiting
    ///
    /// Blocks the caller until every worker has exited. No queued job is
    /// dropped, and a running job that ignores its token delays return until
    /// it completes naturally.
    ///
    /// Calling `shutdown` again after it has begun is a no-op returning
    /// `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Join`] if a worker thread panicked outside job
    /// execution. Remaining workers are still joined on drop.
    pub fn shutdown(&self) -> Result<()> {
        {
            let _queue = self.shared.queue.lock();
            if self.shared.shutdown.is_shutting_down() {
                return Ok(());
            }
            self.shared.shutdown.trigger();
        }

        // All waiting workers must observe the flag, not just one.
        self.shared.work_available.notify_all();

        let workers = std::mem::take(&mut *self.workers.write());
        for worker in workers {
            worker.join()?;
        }

        debug!("pool '{}' shut down", self.config.thread_name_prefix);
        Ok(())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Only attempt shutdown if not already performed
        if !self.shared.shutdown.is_shutting_down() {
            if let Err(e) = self.shutdown() {
                log::error!(
                    "failed to shut down pool '{}' during drop: {}",
                    self.config.thread_name_prefix,
                    e
                );
            }
        }
    }
}
